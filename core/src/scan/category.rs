use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    MetadataFiles,
    ModelArtifacts,
    TrainingConfigs,
    DependencyManifests,
    DatasetFiles,
    DecisionLogs,
    Pipelines,
    Approvals,
    MonitoringReports,
    Documentation,
    OtherText,
}

/// How a single category pattern is tested against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePattern {
    /// Lowercased extension, including the leading dot.
    Extension(&'static str),
    /// Substring of the lowercased file name.
    NameContains(&'static str),
    /// Any directory component between the audit root and the file.
    UnderDirectory(&'static str),
}

impl FilePattern {
    pub fn matches(&self, file_name_lower: &str, extension_lower: &str, rel_dirs: &[String]) -> bool {
        match self {
            FilePattern::Extension(ext) => extension_lower == *ext,
            FilePattern::NameContains(needle) => file_name_lower.contains(needle),
            FilePattern::UnderDirectory(dir) => rel_dirs.iter().any(|d| d == dir),
        }
    }
}

use FilePattern::{Extension as Ext, NameContains as Name, UnderDirectory as Dir};

impl EvidenceCategory {
    /// Classification order; the first category with a matching pattern wins.
    pub const ALL: [EvidenceCategory; 11] = [
        EvidenceCategory::MetadataFiles,
        EvidenceCategory::ModelArtifacts,
        EvidenceCategory::TrainingConfigs,
        EvidenceCategory::DependencyManifests,
        EvidenceCategory::DatasetFiles,
        EvidenceCategory::DecisionLogs,
        EvidenceCategory::Pipelines,
        EvidenceCategory::Approvals,
        EvidenceCategory::MonitoringReports,
        EvidenceCategory::Documentation,
        EvidenceCategory::OtherText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceCategory::MetadataFiles => "metadata_files",
            EvidenceCategory::ModelArtifacts => "model_artifacts",
            EvidenceCategory::TrainingConfigs => "training_configs",
            EvidenceCategory::DependencyManifests => "dependency_manifests",
            EvidenceCategory::DatasetFiles => "dataset_files",
            EvidenceCategory::DecisionLogs => "decision_logs",
            EvidenceCategory::Pipelines => "pipelines",
            EvidenceCategory::Approvals => "approvals",
            EvidenceCategory::MonitoringReports => "monitoring_reports",
            EvidenceCategory::Documentation => "documentation",
            EvidenceCategory::OtherText => "other_text",
        }
    }

    pub fn patterns(&self) -> &'static [FilePattern] {
        match self {
            EvidenceCategory::MetadataFiles => &[
                Name("metadata"),
                Name("model_card"),
                Name("about"),
                Name("info"),
            ],
            EvidenceCategory::ModelArtifacts => &[
                Ext(".pt"),
                Ext(".pth"),
                Ext(".onnx"),
                Ext(".joblib"),
                Ext(".pkl"),
                Ext(".h5"),
                Ext(".safetensors"),
                Name("model."),
                Name("checkpoint"),
            ],
            EvidenceCategory::TrainingConfigs => &[
                Name("config"),
                Name("hyperparameters"),
                Name("train_config"),
                Name("settings"),
                Name("parameters"),
            ],
            EvidenceCategory::DependencyManifests => &[
                Name("requirements.txt"),
                Name("pyproject.toml"),
                Name("environment.yml"),
                Name("pipfile"),
                Name("setup.py"),
                Name("cargo.toml"),
            ],
            EvidenceCategory::DatasetFiles => &[
                // DVC pointers and pipeline files stand in for versioned data.
                Ext(".dvc"),
                Name("dvc.lock"),
                Name("dvc.yaml"),
                Name("dataset"),
                Name("data"),
                Name("train"),
                Name("test"),
                Name("validation"),
                Ext(".csv"),
                Ext(".parquet"),
                Ext(".jsonl"),
            ],
            EvidenceCategory::DecisionLogs => &[
                Name("decision"),
                Name("inference"),
                Name("pred"),
                Name("log"),
                Name("output"),
                Dir("logs"),
            ],
            EvidenceCategory::Pipelines => &[
                Name("pipeline"),
                Name("dag"),
                Name("workflow"),
                Name("orchestration"),
                Name("mlflow"),
            ],
            EvidenceCategory::Approvals => &[
                Name("approval"),
                Name("committee"),
                Name("signoff"),
                Name("approved"),
                Name("review"),
                Name("audit"),
            ],
            EvidenceCategory::MonitoringReports => &[
                Name("monitor"),
                Name("dashboard"),
                Name("metrics"),
                Name("report"),
                Name("performance"),
            ],
            EvidenceCategory::Documentation => &[
                Ext(".md"),
                Ext(".txt"),
                Name("readme"),
                Name("docs"),
                Name("documentation"),
            ],
            EvidenceCategory::OtherText => &[
                Ext(".json"),
                Ext(".yaml"),
                Ext(".yml"),
                Ext(".csv"),
                Ext(".txt"),
                Ext(".md"),
            ],
        }
    }

    /// Categories whose files are parsed into structured values.
    pub fn is_structured_source(&self) -> bool {
        matches!(
            self,
            EvidenceCategory::MetadataFiles | EvidenceCategory::DecisionLogs
        )
    }

    /// First category matching `rel_path` (relative to the audit root).
    pub fn classify(rel_path: &Path) -> Option<EvidenceCategory> {
        let file_name = rel_path.file_name()?.to_string_lossy().to_lowercase();
        let extension = rel_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let rel_dirs: Vec<String> = rel_path
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
                    .collect()
            })
            .unwrap_or_default();

        EvidenceCategory::ALL.into_iter().find(|category| {
            category
                .patterns()
                .iter()
                .any(|p| p.matches(&file_name, &extension, &rel_dirs))
        })
    }
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::EvidenceCategory;
    use std::path::Path;

    fn classify(p: &str) -> Option<EvidenceCategory> {
        EvidenceCategory::classify(Path::new(p))
    }

    #[test]
    fn reproducibility_components_land_in_distinct_categories() {
        assert_eq!(
            classify("requirements.txt"),
            Some(EvidenceCategory::DependencyManifests)
        );
        assert_eq!(
            classify("train_config.yaml"),
            Some(EvidenceCategory::TrainingConfigs)
        );
        assert_eq!(classify("dataset.csv"), Some(EvidenceCategory::DatasetFiles));
        assert_eq!(classify("model.pkl"), Some(EvidenceCategory::ModelArtifacts));
    }

    #[test]
    fn first_matching_category_wins() {
        // "info" (metadata) precedes ".json" (other text).
        assert_eq!(
            classify("metadata/info.json"),
            Some(EvidenceCategory::MetadataFiles)
        );
        assert_eq!(classify("logs/pred.json"), Some(EvidenceCategory::DecisionLogs));
        assert_eq!(classify("logs/events.json"), Some(EvidenceCategory::DecisionLogs));
        assert_eq!(classify("MODEL.ONNX"), Some(EvidenceCategory::ModelArtifacts));
    }

    #[test]
    fn dvc_markers_are_dataset_files() {
        for marker in ["images.dvc", "dvc.lock", "dvc.yaml", "raw/Corpus.DVC"] {
            assert_eq!(
                classify(marker),
                Some(EvidenceCategory::DatasetFiles),
                "{}",
                marker
            );
        }
    }

    #[test]
    fn unmatched_files_are_unclassified() {
        assert_eq!(classify("src/main.rs"), None);
        assert_eq!(classify("image.png"), None);
    }
}
