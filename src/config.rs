//! Constants and environment driven settings.

/// Platform cap on the number of entries the blocking directory accepts.
pub const MAX_TOTAL_ENTRIES: u64 = 24_000_000;

/// Key of the string-array entry holding the sorted prefix list.
pub const PREFIX_STORE_KEY: &str = "blockedPrefixes";

/// Store file used when neither `--store` nor `BLOCKLIST_STORE` is given.
pub const DEFAULT_STORE_FILE: &str = "blocklist_store.json";

/// Directory file written by `export` when no `--output` is given.
pub const DEFAULT_EXPORT_FILE: &str = "blocking_entries.txt";

/// Environment variable naming the store file.
pub const ENV_STORE_FILE: &str = "BLOCKLIST_STORE";

/// Environment variable holding the host reload command.
pub const ENV_RELOAD_CMD: &str = "BLOCKLIST_RELOAD_CMD";

/// Upper bound on host command output we are willing to buffer.
pub const MAX_COMMAND_OUTPUT: usize = 500_000;

/// Host reload command from the environment, if one is set and not blank.
pub fn reload_command_from_env() -> Option<String> {
    std::env::var(ENV_RELOAD_CMD)
        .ok()
        .map(|cmd| cmd.trim().to_string())
        .filter(|cmd| !cmd.is_empty())
}
