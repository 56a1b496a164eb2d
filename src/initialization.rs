use std::env;
use log::info;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::InitError;
use crate::manager_bmkg::Bmkg;
use crate::manager_storage::Store;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {m}{n}";

/// Components used by a job run
pub struct Mgr {
    pub bmkg: Bmkg,
    pub store: Store,
}

/// Loads configuration, sets up logging and returns the components needed for a job run.
///
/// Configuration is read from the file given by the CONFIG_PATH environment variable,
/// if not set the built-in defaults are used.
pub fn init() -> Result<Mgr, InitError> {
    let config = match env::var("CONFIG_PATH") {
        Ok(path) => load_config(&path)?,
        Err(_) => Config::default(),
    };

    let _ = log4rs::init_config(build_log_config(&config.general)?)?;

    info!("aquaprediksi version: {}", env!("CARGO_PKG_VERSION"));

    let mgr = Mgr {
        bmkg: Bmkg::new(&config.bmkg),
        store: Store::new(&config.storage),
    };

    Ok(mgr)
}

/// Builds the log4rs configuration, logging to stdout and/or to a file
///
/// # Arguments
///
/// * 'general' - general configuration holding log settings
pub fn build_log_config(general: &General) -> Result<LogConfig, InitError> {
    let mut builder = LogConfig::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .target(Target::Stdout)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(log_path) = &general.log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    Ok(builder.build(root.build(general.log_level))?)
}
