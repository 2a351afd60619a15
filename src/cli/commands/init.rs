use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::{
    config::{CONFIG_FILE_NAME, default_config_json},
    core::report::Report,
};

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    let summary = if config_path.exists() {
        InitSummary {
            created: false,
            error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
        }
    } else {
        fs::write(config_path, default_config_json()?)?;
        InitSummary {
            created: true,
            error: None,
        }
    };

    Ok(finish(
        CommandKind::Init,
        CommandSummary::Init(summary),
        Report::default(),
    ))
}
