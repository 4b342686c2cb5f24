use crate::dlog;
use crate::errors::DataError;
use crate::provider::DataProvider;
use crate::types::{DiagramDataPoint, Workout, WorkoutMetadata};
use crate::utils::{BundleHandle, DIAGRAM_DOC, METADATA_DOC, WORKOUTS_DOC};
use anyhow::Result;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ListWorkoutsResponse {
    #[serde(default)]
    description: String,
    data: Vec<Workout>,
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(default)]
    description: String,
    workouts: HashMap<String, WorkoutMetadata>,
}

#[derive(Debug, Deserialize)]
struct DiagramDataResponse {
    #[serde(default)]
    description: String,
    workouts: HashMap<String, WorkoutDiagram>,
}

/// Time series of one workout as stored in `diagram_data.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutDiagram {
    #[serde(default)]
    pub description: String,
    pub data: Vec<DiagramDataPoint>,
    #[serde(default)]
    pub states: Vec<String>,
}

/// Serves the three fixture documents of a bundle.
///
/// Documents are located once when the bundle is opened and re-read on every
/// fetch.
#[derive(Debug)]
pub struct FixtureProvider {
    bundle: BundleHandle,
    workouts_doc: Option<PathBuf>,
    metadata_doc: Option<PathBuf>,
    diagram_doc: Option<PathBuf>,
}

impl FixtureProvider {
    /// Open a bundle directory or `.zip`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_handle(BundleHandle::open(path)?))
    }

    pub fn from_handle(bundle: BundleHandle) -> Self {
        let workouts_doc = bundle.document(WORKOUTS_DOC);
        let metadata_doc = bundle.document(METADATA_DOC);
        let diagram_doc = bundle.document(DIAGRAM_DOC);

        for (name, doc) in [
            (WORKOUTS_DOC, &workouts_doc),
            (METADATA_DOC, &metadata_doc),
            (DIAGRAM_DOC, &diagram_doc),
        ] {
            match doc {
                Some(p) => {
                    dlog!(doc = name, path = %p.display(), "fixture document located");
                }
                None => tracing::warn!(
                    doc = name,
                    bundle = %bundle.dir().display(),
                    "fixture document missing from bundle"
                ),
            }
        }

        Self {
            bundle,
            workouts_doc,
            metadata_doc,
            diagram_doc,
        }
    }

    pub fn root(&self) -> &Path {
        self.bundle.dir()
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        doc: Option<&Path>,
        name: &str,
    ) -> Result<T, DataError> {
        let Some(path) = doc else {
            return Err(DataError::NotFound(format!(
                "{name} not found in {}",
                self.root().display()
            )));
        };

        let bytes = tokio::fs::read(path).await?;
        dlog!(doc = name, bytes = bytes.len(), "fixture document read");
        serde_json::from_slice(&bytes).map_err(|e| DataError::decode(name, e))
    }

    /// Full diagram record for `workout_id`, including its state labels.
    pub async fn fetch_diagram(&self, workout_id: &str) -> Result<Option<WorkoutDiagram>, DataError> {
        let resp: DiagramDataResponse = self
            .read_document(self.diagram_doc.as_deref(), DIAGRAM_DOC)
            .await?;
        dlog!(description = %resp.description, series = resp.workouts.len(), "diagram document decoded");

        let mut workouts = resp.workouts;
        let found = workouts.remove(workout_id);
        match &found {
            Some(d) => tracing::info!(workout_id, points = d.data.len(), "diagram data loaded"),
            None => tracing::warn!(workout_id, "no diagram data for workout"),
        }
        Ok(found)
    }
}

impl DataProvider for FixtureProvider {
    async fn fetch_all_workouts(&self) -> Result<Vec<Workout>, DataError> {
        let resp: ListWorkoutsResponse = self
            .read_document(self.workouts_doc.as_deref(), WORKOUTS_DOC)
            .await?;
        tracing::info!(
            description = %resp.description,
            workouts = resp.data.len(),
            "workouts loaded"
        );
        Ok(resp.data)
    }

    async fn fetch_metadata(&self, workout_id: &str) -> Result<Option<WorkoutMetadata>, DataError> {
        let resp: MetadataResponse = self
            .read_document(self.metadata_doc.as_deref(), METADATA_DOC)
            .await?;
        dlog!(description = %resp.description, entries = resp.workouts.len(), "metadata document decoded");

        let mut workouts = resp.workouts;
        let found = workouts.remove(workout_id);
        match &found {
            Some(m) => tracing::info!(
                workout_id,
                distance = m.distance,
                duration = m.duration,
                "metadata loaded"
            ),
            None => tracing::warn!(workout_id, "no metadata for workout"),
        }
        Ok(found)
    }

    async fn fetch_diagram_data(
        &self,
        workout_id: &str,
    ) -> Result<Option<Vec<DiagramDataPoint>>, DataError> {
        Ok(self.fetch_diagram(workout_id).await?.map(|d| d.data))
    }
}
