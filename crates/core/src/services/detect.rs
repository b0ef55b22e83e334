//! File-type detection.
//!
//! Detectors classify raw bytes into a [`FileKind`]; the kind is then used to
//! look up a region resolver.

use crate::model::FileKind;

/// Trait implemented by file-type detectors.
pub trait FileTypeDetector: Send + Sync {
    fn detect(&self, bytes: &[u8]) -> FileKind;
    fn name(&self) -> &'static str;
}

/// Adapts any label-producing detector (libmagic-style text) to a [`FileKind`].
pub struct LabelDetector<F> {
    labeler: F,
}

impl<F> LabelDetector<F>
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    pub fn new(labeler: F) -> Self {
        Self { labeler }
    }
}

impl<F> FileTypeDetector for LabelDetector<F>
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    fn detect(&self, bytes: &[u8]) -> FileKind {
        FileKind::from_label(&(self.labeler)(bytes))
    }

    fn name(&self) -> &'static str {
        "label"
    }
}

/// Detects executable containers by parsing headers with goblin.
#[cfg(feature = "goblin-formats")]
pub struct ObjectDetector;

#[cfg(feature = "goblin-formats")]
impl FileTypeDetector for ObjectDetector {
    fn detect(&self, bytes: &[u8]) -> FileKind {
        use goblin::{mach, Object};

        if bytes.is_empty() {
            return FileKind::Unknown("empty".into());
        }
        match Object::parse(bytes) {
            Ok(Object::PE(_)) => FileKind::Pe,
            Ok(Object::Elf(_)) => FileKind::Elf,
            Ok(Object::Mach(mach::Mach::Binary(_))) => FileKind::MachO,
            Ok(Object::Mach(mach::Mach::Fat(_))) => {
                FileKind::Unknown("Mach-O universal binary".into())
            }
            Ok(Object::Archive(_)) => FileKind::Unknown("ar archive".into()),
            Ok(_) | Err(_) => FileKind::Unknown("data".into()),
        }
    }

    fn name(&self) -> &'static str {
        "goblin"
    }
}
