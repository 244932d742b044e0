use std::{env, path::PathBuf};

use bicos_common::helpers::{parse_boolean_flag, parse_number};
use getnet_tools::GetnetConfig;
use log::*;

const DEFAULT_BICOS_HOST: &str = "127.0.0.1";
const DEFAULT_BICOS_PORT: u16 = 8360;
const DEFAULT_DATA_FILE: &str = "data.json";
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The JSON document holding all marketplace data. It is created if it does not exist.
    pub data_file: PathBuf,
    /// How many events may queue up for a hook before publishers have to wait.
    pub event_buffer_size: usize,
    /// If true, settled charges and unresolved transfers are written to the `bicos::audit` log target.
    pub audit_log: bool,
    pub getnet: GetnetConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BICOS_HOST.to_string(),
            port: DEFAULT_BICOS_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            audit_log: true,
            getnet: GetnetConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BICOS_HOST").ok().unwrap_or_else(|| DEFAULT_BICOS_HOST.into());
        let port = env::var("BICOS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BICOS_PORT. {e} Using the default, {DEFAULT_BICOS_PORT}, \
                         instead."
                    );
                    DEFAULT_BICOS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BICOS_PORT);
        let data_file = env::var("BICOS_DATA_FILE").map(PathBuf::from).unwrap_or_else(|_| {
            info!("🪛️ BICOS_DATA_FILE is not set. Using {DEFAULT_DATA_FILE} in the working directory.");
            PathBuf::from(DEFAULT_DATA_FILE)
        });
        let event_buffer_size = match env::var("BICOS_EVENT_BUFFER_SIZE").ok() {
            None => DEFAULT_EVENT_BUFFER_SIZE,
            Some(s) => match parse_number::<usize>(Some(s.clone())).filter(|&n| n > 0) {
                Some(n) => n,
                None => {
                    warn!(
                        "🪛️ {s} is not a valid event buffer size. Using the default, {DEFAULT_EVENT_BUFFER_SIZE}, \
                         instead."
                    );
                    DEFAULT_EVENT_BUFFER_SIZE
                },
            },
        };
        let audit_log = parse_boolean_flag(env::var("BICOS_AUDIT_LOG").ok(), true);
        let getnet = GetnetConfig::new_from_env_or_default();
        Self { host, port, data_file, event_buffer_size, audit_log, getnet }
    }
}
