//! Environment configuration, loaded once at startup.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Deployment context the browser provisioner is selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentEnv {
    /// Constrained serverless sandbox with a bundled Chromium binary.
    Sandboxed,
    /// Developer machine with a locally installed browser.
    Local,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub deployment: DeploymentEnv,
    /// Bundled Chromium executable (sandboxed deployments).
    pub chromium_executable: Option<PathBuf>,
    /// Writable directory the sandboxed provisioner stages the binary into.
    pub chromium_work_dir: PathBuf,
    /// Directory of extra fonts to pre-load before launching (optional).
    pub fonts_dir: Option<PathBuf>,
    /// Hosted utility-stylesheet injected before PDF capture.
    pub tailwind_cdn: String,
    pub host: String,
    pub port: u16,
}

impl DeploymentEnv {
    /// Map the `APP_ENV` flag; anything but "production" runs local.
    fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some("production") => DeploymentEnv::Sandboxed,
            _ => DeploymentEnv::Local,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").ok();
        let deployment = DeploymentEnv::from_flag(app_env.as_deref());

        let chromium_executable = env::var("CHROMIUM_EXECUTABLE_PATH").ok().map(PathBuf::from);
        if deployment == DeploymentEnv::Sandboxed && chromium_executable.is_none() {
            log::warn!(
                "APP_ENV=production but CHROMIUM_EXECUTABLE_PATH is not set; browser launch will fail"
            );
        }

        Self {
            deployment,
            chromium_executable,
            chromium_work_dir: env::var("CHROMIUM_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/invoice-pdf-chromium")),
            fonts_dir: env::var("PDF_FONTS_DIR").ok().map(PathBuf::from),
            tailwind_cdn: env::var("TAILWIND_CDN")
                .unwrap_or_else(|_| DEFAULT_TAILWIND_CDN.to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
