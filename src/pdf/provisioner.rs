//! Environment-aware browser provisioning.
//!
//! Each rasterization call gets its own Chromium process; the provisioner
//! only decides *how* that process is launched. The concrete strategy is
//! chosen once at startup from [`AppConfig`], not re-branched per request.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use headless_chrome::browser::default_executable;
use headless_chrome::{Browser, LaunchOptions};

use crate::config::{AppConfig, DeploymentEnv};
use crate::pdf::PdfError;

const LAUNCH_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Arguments required inside the serverless sandbox: the host forbids
/// nested sandboxing and caps process/thread counts, so OS sandboxing,
/// the GPU process, the zygote, and site isolation all have to go.
const SANDBOXED_ARGS: &[&str] = &[
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--single-process",
    "--no-zygote",
    "--disable-features=site-per-process,IsolateOrigins",
    "--font-render-hinting=none",
    "--hide-scrollbars",
    "--mute-audio",
];

/// Strategy for producing a running headless-browser process.
pub trait BrowserProvisioner: Send + Sync {
    fn provision(&self) -> Result<Browser, PdfError>;
}

/// Select the provisioner matching the deployment environment.
pub fn from_config(config: &AppConfig) -> std::sync::Arc<dyn BrowserProvisioner> {
    match config.deployment {
        DeploymentEnv::Sandboxed => std::sync::Arc::new(SandboxedProvisioner::new(
            config.chromium_executable.clone(),
            config.chromium_work_dir.clone(),
            config.fonts_dir.clone(),
        )),
        DeploymentEnv::Local => std::sync::Arc::new(LocalProvisioner),
    }
}

/// Launches a locally installed browser with the conventional sandboxed
/// argument set.
pub struct LocalProvisioner;

impl BrowserProvisioner for LocalProvisioner {
    fn provision(&self) -> Result<Browser, PdfError> {
        let executable = default_executable().map_err(PdfError::BrowserLaunch)?;
        Browser::new(LaunchOptions {
            headless: true,
            sandbox: true,
            path: Some(executable),
            idle_browser_timeout: LAUNCH_IDLE_TIMEOUT,
            ..Default::default()
        })
        .map_err(|e| PdfError::BrowserLaunch(format!("{e:#}")))
    }
}

/// Launches a bundled Chromium inside a constrained serverless sandbox.
///
/// The bundle ships on a read-only mount, so the binary is first staged
/// into a writable directory. Staging is idempotent: the copy goes to a
/// per-process temp name and is moved over the target with an atomic
/// rename, so concurrent cold starts converge on one complete binary.
pub struct SandboxedProvisioner {
    bundled_executable: Option<PathBuf>,
    work_dir: PathBuf,
    fonts_dir: Option<PathBuf>,
}

impl SandboxedProvisioner {
    pub fn new(
        bundled_executable: Option<PathBuf>,
        work_dir: PathBuf,
        fonts_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            bundled_executable,
            work_dir,
            fonts_dir,
        }
    }

    fn ensure_writable_executable(&self) -> Result<PathBuf, PdfError> {
        let bundled = self.bundled_executable.as_deref().ok_or_else(|| {
            PdfError::BrowserLaunch("CHROMIUM_EXECUTABLE_PATH is not configured".to_string())
        })?;
        if !bundled.exists() {
            return Err(PdfError::BrowserLaunch(format!(
                "chromium executable not found at {}",
                bundled.display()
            )));
        }

        let target = self.work_dir.join("chromium");
        if target.exists() {
            return Ok(target);
        }

        fs::create_dir_all(&self.work_dir).map_err(|e| {
            PdfError::BrowserLaunch(format!(
                "cannot create work dir {}: {e}",
                self.work_dir.display()
            ))
        })?;

        let staging = self.work_dir.join(format!(".chromium.{}", std::process::id()));
        stage_file(bundled, &staging, &target).map_err(|e| {
            PdfError::BrowserLaunch(format!("cannot stage chromium executable: {e}"))
        })?;
        Ok(target)
    }

    /// Copy extra fonts next to the user's font directory so Chromium can
    /// pick them up. Best effort: a missing font never fails the request.
    fn preload_fonts(&self) {
        let Some(source_dir) = self.fonts_dir.as_deref() else {
            return;
        };
        let Ok(home) = std::env::var("HOME") else {
            log::warn!("HOME is not set, skipping font preload");
            return;
        };
        let target_dir = Path::new(&home).join(".fonts");
        if let Err(e) = fs::create_dir_all(&target_dir) {
            log::warn!("cannot create font dir {}: {e}", target_dir.display());
            return;
        }

        let entries = match fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("cannot read fonts dir {}: {e}", source_dir.display());
                return;
            }
        };
        for entry in entries.flatten() {
            let source = entry.path();
            let Some(name) = source.file_name() else {
                continue;
            };
            let target = target_dir.join(name);
            if target.exists() {
                continue;
            }
            let staging = target_dir.join(format!(".{}.{}", name.to_string_lossy(), std::process::id()));
            if let Err(e) = stage_file(&source, &staging, &target) {
                log::warn!("cannot preload font {}: {e}", source.display());
            }
        }
    }
}

impl BrowserProvisioner for SandboxedProvisioner {
    fn provision(&self) -> Result<Browser, PdfError> {
        let executable = self.ensure_writable_executable()?;
        self.preload_fonts();

        let args: Vec<&OsStr> = SANDBOXED_ARGS.iter().map(OsStr::new).collect();
        Browser::new(LaunchOptions {
            headless: true,
            sandbox: false,
            ignore_certificate_errors: true,
            path: Some(executable),
            args,
            idle_browser_timeout: LAUNCH_IDLE_TIMEOUT,
            ..Default::default()
        })
        .map_err(|e| PdfError::BrowserLaunch(format!("{e:#}")))
    }
}

/// Copy `source` to `staging`, then atomically move it over `target`.
/// Losers of a concurrent race overwrite the target with identical bytes;
/// readers never observe a partially written file.
fn stage_file(source: &Path, staging: &Path, target: &Path) -> std::io::Result<()> {
    fs::copy(source, staging)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staging, fs::Permissions::from_mode(0o755))?;
    }
    fs::rename(staging, target)
}
