// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::FileSource;
use log::{debug, trace};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Opens files directly on the host file system.
///
/// When a root is configured, absolute paths are resolved beneath it, so
/// `/etc/os-release` becomes `<root>/etc/os-release`.
#[derive(Debug, Clone, Default)]
pub struct HostFiles {
    root: Option<PathBuf>,
}

impl HostFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => {
                let relative: PathBuf = path
                    .components()
                    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
                    .collect();
                root.join(relative)
            }
            None => path.to_path_buf(),
        }
    }
}

impl FileSource for HostFiles {
    fn read_file(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let resolved = self.resolve(path);
        trace!("Opening {resolved:?}");

        if resolved.is_dir() {
            return Err(io::Error::other(format!(
                "{} is a directory",
                resolved.display()
            )));
        }

        Ok(Box::new(File::open(resolved)?))
    }
}

/// Memoizes the reads of another [`FileSource`].
///
/// Each path is read from the inner source at most once. Both the contents
/// and a not-found outcome are remembered; any other error is returned
/// without being cached.
#[derive(Debug)]
pub struct CachedFiles<F> {
    inner: F,
    cache: Mutex<HashMap<PathBuf, Option<Arc<[u8]>>>>,
}

impl<F: FileSource> CachedFiles<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn load(&self, path: &Path) -> io::Result<Option<Arc<[u8]>>> {
        match self.inner.read_file(path) {
            Ok(mut reader) => {
                let mut contents = Vec::new();
                reader.read_to_end(&mut contents)?;
                Ok(Some(Arc::from(contents)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<F: FileSource> FileSource for CachedFiles<F> {
    fn read_file(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        let entry = match cache.get(path) {
            Some(entry) => entry.clone(),
            None => {
                debug!("Caching contents of {path:?}");
                let loaded = self.load(path)?;
                cache.insert(path.to_path_buf(), loaded.clone());
                loaded
            }
        };

        match entry {
            Some(contents) => Ok(Box::new(Cursor::new(contents))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist.", path.display()),
            )),
        }
    }
}
