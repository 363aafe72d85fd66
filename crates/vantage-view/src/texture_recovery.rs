//! Best-effort reattachment of missing or broken textures
//!
//! Every material binding is classified and, when unsatisfied, given a chain
//! of candidate files that are tried one at a time through the asset source:
//!
//! - a file reference whose image failed is retried by its bare file name
//!   under the texture root;
//! - a binding with no usable reference walks the ordered keyword table
//!   (mesh and material names, case-insensitive), then the default texture.
//!
//! Attempts for one material are strictly sequential; different materials
//! complete in any order. Exhausting a chain is not an error: the material
//! stays untextured.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use vantage_assets::{
    Asset, AssetError, AssetId, AssetSource, Material, PendingLoad, TextureAsset,
    TextureReference, TextureSlot, TextureState,
};

use crate::config::TextureConfig;

/// Which run over the bindings this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPass {
    /// Right after load; images still decoding are left alone
    Initial,
    /// After the settle delay; images still not decoded count as broken
    Settled,
}

/// Classification of one material's texture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStatus {
    /// Resolved to a decoded, non-empty image
    Satisfied,
    /// Reference present, decode not finished
    Pending,
    /// Reference present, image failed or empty
    Broken,
    /// No texture reference at all
    Unreferenced,
    /// Procedural material that is never textured
    Exempt,
}

/// Classify a material's binding
pub fn classify(material: &Material) -> BindingStatus {
    if !material.texturable {
        return BindingStatus::Exempt;
    }
    match &material.texture {
        None => BindingStatus::Unreferenced,
        Some(slot) if slot.image().is_some() => BindingStatus::Satisfied,
        Some(slot) => match slot.state {
            TextureState::Pending => BindingStatus::Pending,
            _ => BindingStatus::Broken,
        },
    }
}

/// Per-status counts over an asset's materials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RecoverySummary {
    pub satisfied: usize,
    pub pending: usize,
    pub broken: usize,
    pub unreferenced: usize,
    pub exempt: usize,
}

impl RecoverySummary {
    pub fn of(asset: &Asset) -> Self {
        let mut summary = Self::default();
        for material in &asset.materials {
            match classify(material) {
                BindingStatus::Satisfied => summary.satisfied += 1,
                BindingStatus::Pending => summary.pending += 1,
                BindingStatus::Broken => summary.broken += 1,
                BindingStatus::Unreferenced => summary.unreferenced += 1,
                BindingStatus::Exempt => summary.exempt += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobKind {
    /// First decode of an authored file reference
    Decode,
    /// Candidate chain for a broken or missing binding
    Recover,
}

struct RecoveryJob {
    asset: AssetId,
    material: usize,
    kind: JobKind,
    current: PathBuf,
    remaining: VecDeque<PathBuf>,
    pending: PendingLoad<Arc<TextureAsset>>,
}

/// Texture recovery state for the viewer
pub struct TextureRecovery {
    config: TextureConfig,
    texture_root: PathBuf,
    jobs: Vec<RecoveryJob>,
}

impl TextureRecovery {
    pub fn new(config: TextureConfig) -> Self {
        Self {
            texture_root: config.texture_root.clone(),
            config,
            jobs: Vec::new(),
        }
    }

    /// Directory that repaired and fallback file names resolve against
    pub fn texture_root(&self) -> &Path {
        &self.texture_root
    }

    /// Use a per-asset texture root, or the configured one for `None`
    pub fn set_texture_root(&mut self, root: Option<&Path>) {
        self.texture_root = root.map_or_else(|| self.config.texture_root.clone(), Path::to_path_buf);
    }

    /// Number of attempts waiting on the asset source
    pub fn in_flight(&self) -> usize {
        self.jobs.len()
    }

    fn is_busy(&self, asset: AssetId, material: usize) -> bool {
        self.jobs
            .iter()
            .any(|j| j.asset == asset && j.material == material)
    }

    /// Request decodes for every authored file reference still pending.
    pub fn begin(&mut self, asset: &Asset, source: &dyn AssetSource) {
        for (index, material) in asset.materials.iter().enumerate() {
            let Some(slot) = &material.texture else { continue };
            let (TextureState::Pending, TextureReference::File(path)) = (&slot.state, &slot.reference)
            else {
                continue;
            };
            if self.is_busy(asset.id(), index) {
                continue;
            }
            debug!("Decoding texture {} for '{}'", path.display(), material.name);
            // A failed decode falls through to the repair candidates.
            let remaining: VecDeque<PathBuf> = self
                .candidates(asset, index)
                .into_iter()
                .filter(|candidate| candidate != path)
                .collect();
            self.jobs.push(RecoveryJob {
                asset: asset.id(),
                material: index,
                kind: JobKind::Decode,
                current: path.clone(),
                remaining,
                pending: source.request_texture(path),
            });
        }
    }

    /// Candidate files for an unsatisfied binding, in the order they are tried.
    pub fn candidates(&self, asset: &Asset, material: usize) -> Vec<PathBuf> {
        let Some(mat) = asset.materials.get(material) else {
            return Vec::new();
        };

        // Repair a file reference by its bare name.
        if let Some(name) = mat.texture.as_ref().and_then(|s| s.reference.file_name()) {
            return vec![self.texture_root.join(name)];
        }

        let mut names = asset.mesh_names_for_material(material);
        names.push(mat.name.as_str());

        let mut out: Vec<PathBuf> = Vec::new();
        let matched = self
            .config
            .rules
            .iter()
            .filter(|rule| rule.matches(&names))
            .map(|rule| rule.texture.as_str());
        for file in matched.chain(self.config.default_texture.as_deref()) {
            let path = self.texture_root.join(file);
            if !out.contains(&path) {
                out.push(path);
            }
        }
        out
    }

    /// Run one pass over every binding of the asset.
    pub fn scan(&mut self, asset: &mut Asset, pass: RecoveryPass, source: &dyn AssetSource) {
        let id = asset.id();
        for index in 0..asset.materials.len() {
            if self.is_busy(id, index) {
                continue;
            }
            let status = classify(&asset.materials[index]);
            match (status, pass) {
                (BindingStatus::Exempt, _) | (BindingStatus::Pending, RecoveryPass::Initial) => {}
                (BindingStatus::Satisfied, _) => {
                    if let Some(slot) = asset.materials[index].texture.as_mut() {
                        self.normalize_flags(slot);
                    }
                }
                (BindingStatus::Pending, RecoveryPass::Settled)
                | (BindingStatus::Broken, _)
                | (BindingStatus::Unreferenced, _) => {
                    let chain = self.candidates(asset, index);
                    self.start_chain(asset, index, chain, source);
                }
            }
        }
    }

    fn start_chain(
        &mut self,
        asset: &Asset,
        material: usize,
        chain: Vec<PathBuf>,
        source: &dyn AssetSource,
    ) {
        let mut remaining = VecDeque::from(chain);
        let Some(first) = remaining.pop_front() else {
            debug!(
                "No texture candidates for '{}'",
                asset.materials[material].name
            );
            return;
        };
        debug!(
            "Recovering texture for '{}': trying {}",
            asset.materials[material].name,
            first.display()
        );
        self.jobs.push(RecoveryJob {
            asset: asset.id(),
            material,
            kind: JobKind::Recover,
            pending: source.request_texture(&first),
            current: first,
            remaining,
        });
    }

    /// Collect completed attempts and apply them to the active asset.
    ///
    /// Results for any other asset (one that has since been replaced) are
    /// dropped. Returns the number of attempts that completed.
    pub fn poll(&mut self, mut active: Option<&mut Asset>, source: &dyn AssetSource) -> usize {
        let mut completed = 0;
        let mut still_waiting = Vec::with_capacity(self.jobs.len());

        for mut job in std::mem::take(&mut self.jobs) {
            let Some(result) = job.pending.try_recv() else {
                still_waiting.push(job);
                continue;
            };
            completed += 1;

            let Some(asset) = active.as_deref_mut().filter(|a| a.id() == job.asset) else {
                debug!("Dropping texture result for replaced asset {}", job.asset);
                continue;
            };
            let Some(material) = asset.materials.get_mut(job.material) else {
                continue;
            };

            match (job.kind, result) {
                (JobKind::Decode, Ok(image)) if image.is_loaded() => {
                    if let Some(slot) = material.texture.as_mut() {
                        if slot.reference == TextureReference::File(job.current.clone()) {
                            slot.state = TextureState::Ready(image);
                            self.normalize_flags(slot);
                        }
                    }
                }
                (JobKind::Recover, Ok(image)) if image.is_loaded() => {
                    debug!(
                        "Recovered texture for '{}' from {}",
                        material.name,
                        job.current.display()
                    );
                    let mut slot = TextureSlot::ready(TextureReference::File(job.current), image);
                    self.normalize_flags(&mut slot);
                    material.texture = Some(slot);
                }
                (kind, result) => {
                    log_failure(&material.name, &job.current, result.err());
                    if kind == JobKind::Decode {
                        if let Some(slot) = material.texture.as_mut() {
                            if matches!(slot.state, TextureState::Pending) {
                                slot.state = TextureState::Failed;
                            }
                        }
                        job.kind = JobKind::Recover;
                    }
                    match job.remaining.pop_front() {
                        Some(next) => {
                            debug!("Trying {} for '{}'", next.display(), material.name);
                            job.pending = source.request_texture(&next);
                            job.current = next;
                            still_waiting.push(job);
                        }
                        None => {
                            debug!("Texture recovery exhausted for '{}'", material.name);
                        }
                    }
                }
            }
        }

        self.jobs = still_waiting;
        completed
    }

    fn normalize_flags(&self, slot: &mut TextureSlot) {
        slot.wrap_s = self.config.wrap;
        slot.wrap_t = self.config.wrap;
        slot.flip_y = self.config.flip_y;
    }
}

fn log_failure(material: &str, path: &Path, error: Option<AssetError>) {
    match error {
        Some(e) => debug!("Texture {} for '{}' failed: {}", path.display(), material, e),
        None => debug!("Texture {} for '{}' is empty", path.display(), material),
    }
}
