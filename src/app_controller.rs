use anyhow::{Result, anyhow};
use log::{warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::document::{DocumentBatch, DIRECT_INPUT_NAME};
use crate::enhance::{BatchProcessor, Enhancer, EnhancementOp, output_entry_name};
use crate::file_utils::{FileManager, InputKind};

// @module: Application controller for enhancement requests

/// Main application controller for text enhancement
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build the batch processor this controller runs requests through
    fn processor(&self) -> BatchProcessor {
        BatchProcessor::new(Enhancer::new(self.config.cache.enabled))
    }

    /// Reject operations naming kinds outside the configured active set.
    ///
    /// The engine itself is total over kinds; the closed set is a property
    /// of the selection interface, enforced here.
    pub fn validate_ops(&self, ops: &[EnhancementOp]) -> Result<()> {
        for op in ops {
            if !self.config.is_kind_active(op.kind) {
                return Err(anyhow!(
                    "Enhancement kind '{}' is not available (active kinds: {})",
                    op.kind,
                    self.config
                        .emphasis_variant
                        .active_kinds()
                        .iter()
                        .map(|k| k.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }
        Ok(())
    }

    /// Enhance directly-entered text and return the result.
    ///
    /// Single-document mode with the fixed placeholder name; nothing is
    /// written to disk.
    pub fn run_text(&self, text: &str, ops: &[EnhancementOp]) -> Result<String> {
        self.validate_ops(ops)?;

        let batch = DocumentBatch::singleton(DIRECT_INPUT_NAME, text);
        let output = self.processor().process(&batch, ops);

        let document = output
            .get(DIRECT_INPUT_NAME)
            .ok_or_else(|| anyhow!("Enhanced document missing from output batch"))?;

        Ok(document.content.clone())
    }

    /// Run the main workflow for a filesystem input
    pub fn run(
        &self,
        input_path: PathBuf,
        output_dir: PathBuf,
        ops: &[EnhancementOp],
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        self.validate_ops(ops)?;

        if !input_path.exists() {
            return Err(anyhow!("Input path does not exist: {:?}", input_path));
        }

        FileManager::ensure_dir(&output_dir)?;

        if input_path.is_dir() {
            self.run_directory(&input_path, &output_dir, ops, force_overwrite)?;
        } else {
            match FileManager::detect_input_kind(&input_path)? {
                InputKind::Text => {
                    self.run_single_file(&input_path, &output_dir, ops, force_overwrite)?;
                },
                InputKind::Archive => {
                    self.run_archive(&input_path, &output_dir, ops, force_overwrite)?;
                },
                InputKind::Unknown => {
                    return Err(anyhow!(
                        "Unsupported input: {:?} is neither text nor a zip archive",
                        input_path
                    ));
                }
            }
        }

        info!(
            "Enhancement completed in {}.",
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Enhance one text file into `enhanced_<name>` in the output directory
    fn run_single_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        ops: &[EnhancementOp],
        force_overwrite: bool,
    ) -> Result<()> {
        let output_path = FileManager::enhanced_output_path(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, enhanced output already exists (use -f to force overwrite)");
            return Ok(());
        }

        let content = FileManager::read_to_string(input_file)?;
        let name = input_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| DIRECT_INPUT_NAME.to_string());

        let batch = DocumentBatch::singleton(&name, content);
        let output = self.processor().process(&batch, ops);

        let document = output
            .get(&name)
            .ok_or_else(|| anyhow!("Enhanced document missing from output batch"))?;

        FileManager::write_to_file(&output_path, &document.content)?;
        info!("Wrote {:?}", output_path);

        Ok(())
    }

    /// Enhance every text entry of a zip archive.
    ///
    /// A single surviving entry is emitted as a plain text file; several are
    /// repacked into the configured output archive. Undecodable entries are
    /// reported and skipped, never fatal.
    fn run_archive(
        &self,
        input_file: &Path,
        output_dir: &Path,
        ops: &[EnhancementOp],
        force_overwrite: bool,
    ) -> Result<()> {
        let bytes = FileManager::read_to_bytes(input_file)?;

        let processor = self.processor();
        let progress_bar = Self::make_progress_bar(0, "entries");
        let progress_for_callback = progress_bar.clone();

        let report = processor
            .process_archive(&bytes, ops, &self.config.batch.extensions, move |done, total| {
                progress_for_callback.set_length(total as u64);
                progress_for_callback.set_position(done as u64);
            })
            .map_err(|e| anyhow!("{}", e))?;

        progress_bar.finish_and_clear();

        let (hits, misses, hit_rate) = processor.enhancer().cache().stats();
        debug!(
            "Cache: {} hits, {} misses ({:.0}% hit rate)",
            hits,
            misses,
            hit_rate * 100.0
        );

        if report.documents.is_empty() {
            if report.failures.is_empty() {
                return Err(anyhow!(
                    "Archive contains no text entries matching extensions {:?}",
                    self.config.batch.extensions
                ));
            }
            return Err(anyhow!(
                "No entries could be decoded: {}",
                report.failure_summary()
            ));
        }

        if report.is_partial() {
            warn!(
                "{} of {} entries skipped: {}",
                report.failures.len(),
                report.failures.len() + report.documents.len(),
                report.failure_summary()
            );
        }

        if let [document] = report.documents.iter().as_slice() {
            // Single survivor: emit a plain text file rather than an archive.
            let output_path = output_dir.join(output_entry_name(&document.name));
            if output_path.exists() && !force_overwrite {
                warn!("Skipping file, enhanced output already exists (use -f to force overwrite)");
                return Ok(());
            }
            FileManager::write_to_file(&output_path, &document.content)?;
            info!("Wrote {:?}", output_path);
            return Ok(());
        }

        let archive_path = output_dir.join(&self.config.batch.archive_name);
        if archive_path.exists() && !force_overwrite {
            warn!("Skipping archive, enhanced output already exists (use -f to force overwrite)");
            return Ok(());
        }

        let packed = processor
            .pack_outputs(&report.documents)
            .map_err(|e| anyhow!("{}", e))?;
        FileManager::write_bytes(&archive_path, &packed)?;
        info!(
            "Wrote {:?} ({} entries)",
            archive_path,
            report.documents.len()
        );

        Ok(())
    }

    /// Enhance every text file found under a directory, one output file per
    /// input, preserving nothing but the file names
    fn run_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        ops: &[EnhancementOp],
        force_overwrite: bool,
    ) -> Result<()> {
        let mut files = Vec::new();
        for extension in &self.config.batch.extensions {
            files.extend(FileManager::find_files(input_dir, extension)?);
        }
        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(anyhow!(
                "No files matching extensions {:?} under {:?}",
                self.config.batch.extensions,
                input_dir
            ));
        }

        info!("Found {} file(s) to enhance", files.len());

        let progress_bar = Self::make_progress_bar(files.len() as u64, "files");

        let mut success_count = 0;
        let mut skip_count = 0;
        let mut error_count = 0;

        for file in &files {
            let output_path = FileManager::enhanced_output_path(file, output_dir);
            if output_path.exists() && !force_overwrite {
                debug!("Skipping {:?}, output exists", file);
                skip_count += 1;
                progress_bar.inc(1);
                continue;
            }

            match self.run_single_file(file, output_dir, ops, force_overwrite) {
                Ok(()) => success_count += 1,
                Err(e) => {
                    warn!("Failed to enhance {:?}: {}", file, e);
                    error_count += 1;
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Directory done: {} enhanced, {} skipped, {} failed",
            success_count, skip_count, error_count
        );

        if success_count == 0 && error_count > 0 {
            return Err(anyhow!("All {} file(s) failed to enhance", error_count));
        }

        Ok(())
    }

    /// Build a progress bar in the application's house style
    fn make_progress_bar(len: u64, unit: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%)",
                unit
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    // @returns: Human-readable duration
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
