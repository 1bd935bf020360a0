//! Module graph driver.
//!
//! Holds the built-in example graph, modelled on real block and SCSI
//! modules, and drives generation of every module source plus the
//! aggregate recipe file.
//!
//! The dependency graph is implicit: an edge exists wherever one module's
//! `calls` names a symbol another module `provides`. Generation does not
//! look at it; see [`crate::kernel::validator`] for the opt-in check.

use crate::config::GeneratorSettings;
use crate::error::{GenError, Result};
use crate::kernel::emitter;
use crate::models::{GraphMode, ModuleDescriptor};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// The fixed part of the built-in graph, in generation order.
pub fn baseline_modules() -> Vec<ModuleDescriptor> {
    vec![
        ModuleDescriptor::new("scsi_transport_fc")
            .with_provides(["fc_attach_transport", "fc_vport_create"])
            .with_calls(["scsi_target_block"]),
        ModuleDescriptor::new("scsi_mod").with_provides([
            "scsi_target_block",
            "scsi_host_get",
            "scsi_dma_map",
            "scsi_mode_sense",
            "scsi_is_sdev_device",
            "scsi_print_sense_hdr",
            "__scsi_iterate_devices",
            "scsi_dh_attach",
            "scsi_remove_host",
        ]),
        ModuleDescriptor::new("nvme-fc")
            .with_provides(["nvme_fc_set_remoteport_devloss"])
            .with_calls(["nvme_uninit_ctrl", "nvmf_fail_nonready_command"]),
        ModuleDescriptor::new("nvme-fabrics")
            .with_provides(["nvmf_fail_nonready_command"])
            .with_calls(["nvme_complete_rq"]),
        ModuleDescriptor::new("nvme-core")
            .with_provides(["nvme_complete_rq", "nvme_uninit_ctrl"])
            .with_calls(["t10_pi_type1_crc"]),
        ModuleDescriptor::new("t10-pi").with_provides(["t10_pi_type1_crc"]),
        ModuleDescriptor::new("scsi_dh_alua").with_calls(["scsi_print_sense_hdr"]),
        ModuleDescriptor::new("target_core_mod")
            .with_provides(["target_execute_cmd", "target_backend_unregister"])
            .with_calls(["config_group_init"]),
        ModuleDescriptor::new("target_core_iblock").with_calls(["target_backend_unregister"]),
        ModuleDescriptor::new("configfs").with_provides(["config_group_init"]),
        ModuleDescriptor::new("mpt3sas").with_calls([
            "sas_enable_tlr",
            "scsi_dma_map",
            "raid_class_attach",
        ]),
        ModuleDescriptor::new("scsi_transport_sas")
            .with_provides(["sas_enable_tlr", "scsi_is_sas_rphy"])
            .with_calls(["scsi_mode_sense"]),
        ModuleDescriptor::new("raid_class")
            .with_provides(["raid_class_attach"])
            .with_calls(["scsi_is_sdev_device"]),
        ModuleDescriptor::new("sd_mod").with_calls(["scsi_print_sense_hdr", "t10_pi_type1_crc"]),
        ModuleDescriptor::new("sr_mod").with_calls(["scsi_mode_sense", "register_cdrom"]),
        ModuleDescriptor::new("cdrom").with_provides(["register_cdrom"]),
        ModuleDescriptor::new("ses").with_calls([
            "__scsi_iterate_devices",
            "scsi_is_sas_rphy",
            "enclosure_remove_device",
        ]),
        ModuleDescriptor::new("enclosure").with_provides(["enclosure_remove_device"]),
        ModuleDescriptor::new("dm-multipath")
            .with_provides(["dm_unregister_path_selector"])
            .with_calls(["dm_table_run_md_queue_async", "scsi_dh_attach"]),
        ModuleDescriptor::new("dm-service-time").with_calls(["dm_unregister_path_selector"]),
        ModuleDescriptor::new("dm-mod").with_provides(["dm_table_run_md_queue_async"]),
    ]
}

/// The qla2xxx/tcm_qla2xxx pair.
///
/// The pair differs between modes only in whether `qlt_stop_phase2` is a
/// `void f(void)` or a `void f(int)` export, which exercises both emitter
/// paths across two otherwise identical runs.
pub fn qla_pair(mode: GraphMode) -> [ModuleDescriptor; 2] {
    let qla_calls = [
        "fc_attach_transport",
        "nvme_fc_set_remoteport_devloss",
        "scsi_remove_host",
    ];
    match mode {
        GraphMode::Default => [
            ModuleDescriptor::new("qla2xxx")
                .with_provides(["qlt_stop_phase2"])
                .with_calls(qla_calls),
            ModuleDescriptor::new("tcm_qla2xxx").with_calls([
                "target_execute_cmd",
                "qlt_stop_phase2",
                "scsi_host_get",
                "fc_vport_create",
            ]),
        ],
        GraphMode::Other => [
            ModuleDescriptor::new("qla2xxx")
                .with_int_provides(["qlt_stop_phase2"])
                .with_calls(qla_calls),
            ModuleDescriptor::new("tcm_qla2xxx")
                .with_int_calls(["qlt_stop_phase2"])
                .with_calls(["target_execute_cmd", "scsi_host_get", "fc_vport_create"]),
        ],
    }
}

/// Files produced by one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Source files, in generation order
    pub sources: Vec<PathBuf>,
    pub recipe: PathBuf,
}

/// An ordered list of module descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGraph {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleGraph {
    /// Built-in graph: the baseline set followed by the mode's qla pair.
    pub fn builtin(mode: GraphMode) -> Self {
        let mut modules = baseline_modules();
        modules.extend(qla_pair(mode));
        Self { modules }
    }

    pub fn from_modules(modules: Vec<ModuleDescriptor>) -> Self {
        Self { modules }
    }

    /// Pick the graph for a run: the settings' custom graph if it has one,
    /// the built-in graph for `mode` otherwise.
    pub fn for_settings(settings: &GeneratorSettings, mode: GraphMode) -> Self {
        if settings.has_custom_graph() {
            if mode != GraphMode::Default {
                log::warn!(
                    "[Graph] mode '{}' ignored: settings provide a custom graph",
                    mode
                );
            }
            Self::from_modules(settings.modules.clone())
        } else {
            Self::builtin(mode)
        }
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Recipe file content: one `obj-m` line per module, in graph order.
    pub fn render_recipe(&self, prefix: &str) -> String {
        self.modules
            .iter()
            .map(|m| format!("obj-m += {}\n", emitter::object_file_name(prefix, &m.name)))
            .collect()
    }

    /// Write every module source, then the recipe file.
    ///
    /// Creates the output directory if needed. The first failing write aborts
    /// the run; files already written are left in place.
    pub fn generate(&self, settings: &GeneratorSettings) -> Result<GenerationReport> {
        let dir = &settings.output_dir;
        fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;

        let mut sources = Vec::with_capacity(self.modules.len());
        for module in &self.modules {
            sources.push(emitter::write_to(module, dir, settings)?);
        }

        let recipe = settings.recipe_path();
        fs::write(&recipe, self.render_recipe(&settings.prefix))
            .map_err(|e| GenError::io(&recipe, e))?;

        log::info!(
            "[Graph] generated {} module sources and {} in {}",
            sources.len(),
            settings.recipe_file,
            dir.display()
        );
        Ok(GenerationReport { sources, recipe })
    }
}
