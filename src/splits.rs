use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::constants::splits::{BUCKET_SIZE, OUTPUT_FILE_MODE, TRAIN_PER_BUCKET};
use crate::data::LabeledText;
use crate::errors::PrepError;
use crate::types::Label;

/// Dataset partitions produced by the splitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitLabel {
    /// Training split.
    Train,
    /// Held-out test split.
    Test,
}

/// Per-category train-count rule.
///
/// The train count is `(total / bucket_size) * train_per_bucket` in integer
/// arithmetic. With the default 100/80 policy a category of 99 documents
/// yields no training documents at all; the truncation is kept as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPolicy {
    /// Documents per bucket.
    pub bucket_size: usize,
    /// Training documents taken from each full bucket.
    pub train_per_bucket: usize,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            bucket_size: BUCKET_SIZE,
            train_per_bucket: TRAIN_PER_BUCKET,
        }
    }
}

impl SplitPolicy {
    /// Validate that buckets are non-empty and never assign more than they hold.
    pub fn validated(self) -> Result<Self, PrepError> {
        if self.bucket_size == 0 {
            return Err(PrepError::Configuration(
                "split bucket size must be positive".to_string(),
            ));
        }
        if self.train_per_bucket > self.bucket_size {
            return Err(PrepError::Configuration(format!(
                "train per bucket ({}) exceeds bucket size ({})",
                self.train_per_bucket, self.bucket_size
            )));
        }
        Ok(self)
    }

    /// Number of training documents for a category of `total` documents.
    pub fn train_count(&self, total: usize) -> usize {
        (total / self.bucket_size) * self.train_per_bucket
    }
}

/// Train/test counts for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySplit {
    /// Category label.
    pub label: Label,
    /// Documents loaded for the category.
    pub total: usize,
    /// Documents assigned to training.
    pub train: usize,
    /// Documents assigned to the held-out set.
    pub test: usize,
}

/// Result of a stratified split, in category iteration order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SplitOutput {
    /// Training samples.
    pub train: Vec<LabeledText>,
    /// Held-out samples.
    pub test: Vec<LabeledText>,
    /// Per-category counts.
    pub categories: Vec<CategorySplit>,
}

impl SplitOutput {
    /// Samples assigned to `label`.
    pub fn samples(&self, label: SplitLabel) -> &[LabeledText] {
        match label {
            SplitLabel::Train => &self.train,
            SplitLabel::Test => &self.test,
        }
    }

    /// Recreate both output files with one `text<TAB>label` line per sample.
    ///
    /// Existing files are removed first. Each file is written to a temporary
    /// sibling and renamed into place, so a failed write leaves the target
    /// absent rather than half-written.
    pub fn write_tsv(
        &self,
        train_path: impl AsRef<Path>,
        test_path: impl AsRef<Path>,
    ) -> Result<(), PrepError> {
        let train_path = train_path.as_ref();
        let test_path = test_path.as_ref();
        remove_stale_output(train_path)?;
        remove_stale_output(test_path)?;
        write_labeled_tsv(train_path, &self.train)?;
        write_labeled_tsv(test_path, &self.test)?;
        info!(
            train_path = %train_path.display(),
            test_path = %test_path.display(),
            train = self.train.len(),
            test = self.test.len(),
            "wrote train/test split"
        );
        Ok(())
    }
}

/// Randomized per-category splitter.
pub struct DatasetSplitter {
    policy: SplitPolicy,
    rng: StdRng,
}

impl DatasetSplitter {
    /// Create a splitter; `seed` fixes the shuffle order, `None` seeds from the OS.
    pub fn new(policy: SplitPolicy, seed: Option<u64>) -> Result<Self, PrepError> {
        let policy = policy.validated()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { policy, rng })
    }

    /// Active train-count policy.
    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    /// Shuffle each category independently and divide it into train and test.
    ///
    /// Output order follows the map's iteration order; there is no shuffle
    /// across categories.
    pub fn split(&mut self, buckets: IndexMap<Label, Vec<String>>) -> SplitOutput {
        let mut output = SplitOutput::default();
        for (label, mut documents) in buckets {
            documents.shuffle(&mut self.rng);
            let total = documents.len();
            let train_count = self.policy.train_count(total).min(total);
            let held_out = documents.split_off(train_count);
            debug!(
                category = %label,
                total,
                train = train_count,
                test = held_out.len(),
                "split category"
            );
            output.categories.push(CategorySplit {
                label: label.clone(),
                total,
                train: train_count,
                test: held_out.len(),
            });
            output.train.extend(
                documents
                    .into_iter()
                    .map(|text| LabeledText::new(text, label.clone())),
            );
            output.test.extend(
                held_out
                    .into_iter()
                    .map(|text| LabeledText::new(text, label.clone())),
            );
        }
        output
    }
}

fn remove_stale_output(path: &Path) -> Result<(), PrepError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(PrepError::resource(path, err)),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<&Path, PrepError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|err| PrepError::resource(parent, err))?;
            Ok(parent)
        }
        _ => Ok(Path::new(".")),
    }
}

fn write_labeled_tsv(path: &Path, samples: &[LabeledText]) -> Result<(), PrepError> {
    let dir = ensure_parent_dir(path)?;
    let mut staged = NamedTempFile::new_in(dir).map_err(|err| PrepError::resource(path, err))?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        for sample in samples {
            writeln!(writer, "{}", sample.to_tsv_line())
                .map_err(|err| PrepError::resource(path, err))?;
        }
        writer
            .flush()
            .map_err(|err| PrepError::resource(path, err))?;
    }
    set_output_mode(staged.as_file(), path)?;
    staged
        .persist(path)
        .map_err(|err| PrepError::resource(path, err.error))?;
    Ok(())
}

// Staged files are created owner-only; outputs get a regular file mode.
#[cfg(unix)]
fn set_output_mode(file: &fs::File, path: &Path) -> Result<(), PrepError> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(OUTPUT_FILE_MODE))
        .map_err(|err| PrepError::resource(path, err))
}

#[cfg(not(unix))]
fn set_output_mode(_file: &fs::File, _path: &Path) -> Result<(), PrepError> {
    let _ = OUTPUT_FILE_MODE;
    Ok(())
}
