//! Presentation-agnostic controller for one export/import target.
//!
//! A dialog (or any other front end) picks an object from the scene selection,
//! optionally sets a start frame, then exports to or imports from a file.

use std::path::{Path, PathBuf};

use log::debug;

use crate::channels::{export_document, import_document_with};
use crate::config::CodecConfig;
use crate::error::{AnimIoError, Result};
use crate::host::{selected_objects, Animatable, Scene};
use crate::io::{read_document, write_document_with};

#[derive(Clone, Debug)]
struct Item<H> {
    handle: H,
    name: String,
}

#[derive(Clone, Debug)]
pub struct Session<H> {
    item: Option<Item<H>>,
    start_frame: Option<i64>,
    exclude_classes: Vec<String>,
    config: CodecConfig,
}

impl<H: Clone> Default for Session<H> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl<H: Clone> Session<H> {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            item: None,
            start_frame: None,
            exclude_classes: Vec::new(),
            config,
        }
    }

    /// Skip objects of this host class when picking from the selection.
    pub fn exclude_class(mut self, class_name: impl Into<String>) -> Self {
        self.exclude_classes.push(class_name.into());
        self
    }

    /// Pick the first eligible selected object. Keeps the previous item and
    /// returns `None` when nothing eligible is selected.
    pub fn add_selection<S>(&mut self, scene: &S) -> Option<&str>
    where
        S: Scene<Handle = H>,
    {
        let exclude: Vec<&str> = self.exclude_classes.iter().map(String::as_str).collect();
        let handle = selected_objects(scene, &exclude).into_iter().next()?;
        let name = scene.object(&handle)?.name().to_string();
        debug!("Added {name} to session");
        self.item = Some(Item { handle, name });
        self.item_name()
    }

    pub fn item_name(&self) -> Option<&str> {
        self.item.as_ref().map(|i| i.name.as_str())
    }

    pub fn clear_item(&mut self) {
        self.item = None;
    }

    /// `None` imports at the recorded times.
    pub fn set_start_frame(&mut self, start_frame: Option<i64>) {
        self.start_frame = start_frame;
    }

    pub fn start_frame(&self) -> Option<i64> {
        self.start_frame
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Export the current item to `path` (`.json` appended if missing).
    pub fn export_to_file<S>(&self, scene: &S, path: impl AsRef<Path>) -> Result<PathBuf>
    where
        S: Scene<Handle = H>,
    {
        let item = self.item.as_ref().ok_or(AnimIoError::NoObjectSelected)?;
        let object = scene
            .object(&item.handle)
            .ok_or_else(|| gone(&item.name))?;
        let doc = export_document(object)?;
        write_document_with(path, &doc, &self.config)
    }

    /// Read `path` and apply it to the current item, honouring the start frame.
    pub fn import_from_file<S>(&self, scene: &mut S, path: impl AsRef<Path>) -> Result<()>
    where
        S: Scene<Handle = H>,
    {
        let item = self.item.as_ref().ok_or(AnimIoError::NoObjectSelected)?;
        let doc = read_document(path)?;
        let object = scene
            .object_mut(&item.handle)
            .ok_or_else(|| gone(&item.name))?;
        import_document_with(object, &doc, self.start_frame, &self.config)
    }
}

fn gone(name: &str) -> AnimIoError {
    AnimIoError::host(format!("{name} is no longer in the scene"))
}
