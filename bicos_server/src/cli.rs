use std::{env, env::VarError};

/// The server takes no arguments. Passing any prints the help text and the current configuration.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // BICOS_GETNET_TOKEN is deliberately absent
    const DISPLAY_ENVS: [&str; 9] = [
        "RUST_LOG",
        "BICOS_HOST",
        "BICOS_PORT",
        "BICOS_DATA_FILE",
        "BICOS_EVENT_BUFFER_SIZE",
        "BICOS_AUDIT_LOG",
        "BICOS_GETNET_URL",
        "BICOS_GETNET_SELLER_ID",
        "BICOS_GETNET_TIMEOUT_MS",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
