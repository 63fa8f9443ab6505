//! Rapport de conversion et progression
//!
//! Ce module fournit des structures pour collecter et afficher
//! les résultats d'une conversion (un fichier ou un lot).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Statut d'un fichier dans un lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileStatus {
    /// Fichier converti
    Converted,
    /// Fichier source absent
    Missing,
}

/// Compteurs d'une transformation de document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    /// Nombre total de features
    pub features: usize,
    /// Features dont les coordonnées ont été reprojetées
    pub transformed: usize,
    /// Features sans géométrie ou sans coordonnées, recopiées telles quelles
    pub passthrough: usize,
    /// Nombre de positions reprojetées
    pub positions: usize,
}

impl TransformStats {
    /// Cumule les compteurs d'un autre document
    pub fn merge(&mut self, other: &TransformStats) {
        self.features += other.features;
        self.transformed += other.transformed;
        self.passthrough += other.passthrough;
        self.positions += other.positions;
    }
}

/// Rapport pour un fichier
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: FileStatus,
    #[serde(flatten)]
    pub stats: TransformStats,
    pub duration_secs: f64,
}

/// Rapport complet de conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Backend de reprojection utilisé
    pub backend: String,
    /// Durée totale
    pub duration_secs: f64,
    pub files: Vec<FileReport>,
}

impl ConversionReport {
    pub fn new(backend: &str) -> Self {
        Self {
            backend: backend.to_string(),
            ..Default::default()
        }
    }

    /// Enregistre un fichier converti
    pub fn record_converted(
        &mut self,
        input: &Path,
        output: &Path,
        stats: TransformStats,
        duration: Duration,
    ) {
        self.files.push(FileReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            status: FileStatus::Converted,
            stats,
            duration_secs: duration.as_secs_f64(),
        });
    }

    /// Enregistre un fichier source absent
    pub fn record_missing(&mut self, input: &Path, output: &Path) {
        self.files.push(FileReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            status: FileStatus::Missing,
            stats: TransformStats::default(),
            duration_secs: 0.0,
        });
    }

    /// Définit la durée totale
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    pub fn converted(&self) -> usize {
        self.count(FileStatus::Converted)
    }

    pub fn missing(&self) -> usize {
        self.count(FileStatus::Missing)
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Compteurs cumulés de tous les fichiers
    pub fn totals(&self) -> TransformStats {
        let mut totals = TransformStats::default();
        for file in &self.files {
            totals.merge(&file.stats);
        }
        totals
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        let totals = self.totals();

        println!("\n=== Summary ===");
        println!("Backend: {}", self.backend);
        println!("Duration: {:.2}s", self.duration_secs);
        println!(
            "Files: {} converted, {} missing",
            self.converted(),
            self.missing()
        );
        println!(
            "Features: {} total, {} transformed, {} passed through",
            totals.features, totals.transformed, totals.passthrough
        );
        println!("Positions: {}", totals.positions);

        let missing: Vec<_> = self
            .files
            .iter()
            .filter(|f| f.status == FileStatus::Missing)
            .collect();
        if !missing.is_empty() {
            println!("\nMissing inputs:");
            for f in missing {
                println!("  {}", f.input.display());
            }
        }
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Affichage périodique de la progression sur stdout
///
/// Utilisable depuis plusieurs threads.
pub struct Progress {
    total: usize,
    interval: usize,
    done: AtomicUsize,
    enabled: bool,
}

impl Progress {
    pub fn new(total: usize, interval: usize, enabled: bool) -> Self {
        Self {
            total,
            interval: interval.max(1),
            done: AtomicUsize::new(0),
            enabled,
        }
    }

    /// Compte une feature traitée, affiche tous les `interval`
    pub fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.enabled && done % self.interval == 0 {
            print!("\r  Progress: {}/{}", done, self.total);
            let _ = std::io::stdout().flush();
        }
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    /// Termine la ligne de progression
    pub fn finish(&self) {
        if self.enabled {
            println!("\n  Transformed all features");
        }
    }
}
