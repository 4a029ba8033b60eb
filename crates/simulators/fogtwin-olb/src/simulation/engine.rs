use log::debug;

use fogtwin_models::placement::deploy::ModuleDeployer;

#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub app_name: String,
    pub module_name: String,
    pub target_nodes: Vec<String>,
}

/// Stand-in for the simulation engine: it keeps the deployments it is asked for so that
/// they can be inspected once the placement is done.
#[derive(Debug, Default)]
pub struct DeploymentLog {
    deployments: Vec<Deployment>,
}

impl DeploymentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deployments(&self) -> &[Deployment] {
        &self.deployments
    }

    /// Number of modules deployed on the node with the given engine name.
    pub fn modules_on(&self, node_name: &str) -> usize {
        self.deployments
            .iter()
            .filter(|d| d.target_nodes.iter().any(|target| target == node_name))
            .count()
    }
}

impl ModuleDeployer for DeploymentLog {
    fn deploy_module(
        &mut self,
        app_name: &str,
        module_name: &str,
        _services: &[String],
        target_nodes: &[String],
    ) {
        debug!("Deploying {} of {} on {:?}", module_name, app_name, target_nodes);
        self.deployments.push(Deployment {
            app_name: app_name.to_string(),
            module_name: module_name.to_string(),
            target_nodes: target_nodes.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_modules_per_node() {
        let mut log = DeploymentLog::new();
        let fog_0 = vec!["fog_0".to_string()];
        log.deploy_module("app", "Processing_Module_Sensor_0", &[], &fog_0);
        log.deploy_module("app", "Processing_Module_Sensor_1", &[], &fog_0);
        log.deploy_module("app", "Processing_Module_Sensor_2", &[], &["fog_1".to_string()]);
        assert_eq!(log.deployments().len(), 3);
        assert_eq!(log.modules_on("fog_0"), 2);
        assert_eq!(log.modules_on("fog_10"), 0);
    }
}
