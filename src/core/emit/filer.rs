//! Output providers for generated sources.
//!
//! A [`Filer`] turns a fully qualified type name into a writable stream. Only
//! create-and-write is supported, and each name may be created once per round.

use std::{
    collections::{BTreeMap, HashSet},
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

/// Extension of generated source files.
pub const SOURCE_EXTENSION: &str = "java";

pub trait Filer {
    type Writer<'a>: Write
    where
        Self: 'a;

    /// Create the source file for `qualified_name` and open it for writing.
    fn create_source_file(&mut self, qualified_name: &str) -> io::Result<Self::Writer<'_>>;
}

fn already_created(qualified_name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} was already generated in this round", qualified_name),
    )
}

/// Writes sources under a root directory, one directory per package segment.
#[derive(Debug)]
pub struct FsFiler {
    root: PathBuf,
    created: HashSet<String>,
}

impl FsFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: HashSet::new(),
        }
    }

    /// `com.example.Main_ViewBinding` → `<root>/com/example/Main_ViewBinding.java`
    pub fn path_for(&self, qualified_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(qualified_name.split('.'));
        path.set_extension(SOURCE_EXTENSION);
        path
    }
}

impl Filer for FsFiler {
    type Writer<'a>
        = BufWriter<File>
    where
        Self: 'a;

    fn create_source_file(&mut self, qualified_name: &str) -> io::Result<Self::Writer<'_>> {
        if self.created.contains(qualified_name) {
            return Err(already_created(qualified_name));
        }

        let path = self.path_for(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        self.created.insert(qualified_name.to_string());
        Ok(BufWriter::new(file))
    }
}

/// Keeps generated sources in memory, keyed by qualified name.
///
/// Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryFiler {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a generated source, if it was created and is valid UTF-8.
    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.files
            .get(qualified_name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filer for MemoryFiler {
    type Writer<'a>
        = &'a mut Vec<u8>
    where
        Self: 'a;

    fn create_source_file(&mut self, qualified_name: &str) -> io::Result<Self::Writer<'_>> {
        if self.files.contains_key(qualified_name) {
            return Err(already_created(qualified_name));
        }
        Ok(self.files.entry(qualified_name.to_string()).or_default())
    }
}
