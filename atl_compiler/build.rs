// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    serialization: SerializationLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_input_length: usize,
    max_quoted_string_size: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_conditions_per_group: usize,
    max_alt_groups: usize,
    max_hit_target_digits: usize,
}

#[derive(serde::Deserialize)]
struct SerializationLimits {
    max_serialized_length: usize,
    badge_id_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ATL_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ATL_CONFIG_DIR");

    let profile = env::var("ATL_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ATL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of atl_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_INPUT_LENGTH: usize = 16_777_216;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.lexical.max_input_length > ABSOLUTE_MAX_INPUT_LENGTH {
        panic!("LIMITS: max_input_length exceeds absolute maximum");
    }

    if config.serialization.badge_id_length == 0 {
        panic!("LIMITS: badge_id_length must be at least 1");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_INPUT_LENGTH: usize = {};
        pub const MAX_QUOTED_STRING_SIZE: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_CONDITIONS_PER_GROUP: usize = {};
        pub const MAX_ALT_GROUPS: usize = {};
        pub const MAX_HIT_TARGET_DIGITS: usize = {};
    }}

    pub mod serialization {{
        pub const MAX_SERIALIZED_LENGTH: usize = {};
        pub const BADGE_ID_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
    }}
}}
"#,
        profile,
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count,
        config.lexical.max_input_length,
        config.lexical.max_quoted_string_size,
        config.syntax.max_conditions_per_group,
        config.syntax.max_alt_groups,
        config.syntax.max_hit_target_digits,
        config.serialization.max_serialized_length,
        config.serialization.badge_id_length,
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
    );

    fs::write(output_path, constants_code).unwrap();
}
