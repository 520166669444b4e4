//! In-memory test doubles
//!
//! [`MemFs`] is a flat table of paths enumerated in insertion order, with
//! handle accounting and fault injection. [`ScriptedKeys`] replays a fixed
//! list of key events.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::error::FsError;
use crate::fs::{DirectoryEntry, DiskFile, FileSystem};
use crate::input::{KeyEvent, KeySource};

struct Node {
    path: String,
    is_dir: bool,
    read_only: bool,
    data: Rc<RefCell<Vec<u8>>>,
}

impl Node {
    fn parent(&self) -> &str {
        match self.path.rfind('/') {
            Some(cut) => &self.path[..cut],
            None => "",
        }
    }

    fn name(&self) -> &str {
        match self.path.rfind('/') {
            Some(cut) => &self.path[cut + 1..],
            None => &self.path,
        }
    }
}

/// Open directory on a [`MemFs`]
#[derive(Debug)]
pub struct MemDir {
    path: String,
    next: usize,
    reads: usize,
}

/// Open file on a [`MemFs`], sharing its contents with the filesystem
#[derive(Debug, Clone)]
pub struct MemFile {
    path: String,
    data: Rc<RefCell<Vec<u8>>>,
    pos: u64,
}

impl MemFile {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Snapshot of the file contents
    pub fn contents(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }
}

impl DiskFile for MemFile {
    fn size(&self) -> u64 {
        self.data.borrow().len() as u64
    }

    fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        self.pos = offset;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        let data = self.data.borrow();
        let start = (self.pos as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, FsError> {
        let mut data = self.data.borrow_mut();
        let start = (self.pos as usize).min(data.len());
        let n = bytes.len().min(data.len() - start);
        data[start..start + n].copy_from_slice(&bytes[..n]);
        self.pos += n as u64;
        Ok(n)
    }
}

/// In-memory filesystem
#[derive(Default)]
pub struct MemFs {
    nodes: Vec<Node>,
    open_dirs: usize,
    peak_open_dirs: usize,
    dir_opens: usize,
    rewinds: usize,
    max_open_dirs: Option<usize>,
    failing_dirs: Vec<String>,
    failing_files: Vec<String>,
    read_faults: Vec<(String, usize)>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder. Parents are not created implicitly.
    pub fn add_dir(&mut self, path: &str) {
        self.push(path, true, false, Vec::new());
    }

    /// Add a file of `size` bytes filled with a repeating pattern
    pub fn add_file(&mut self, path: &str, size: usize) {
        let data = (0..size).map(|i| i as u8).collect();
        self.push(path, false, false, data);
    }

    /// Add a file with explicit contents
    pub fn add_file_with(&mut self, path: &str, data: &[u8]) {
        self.push(path, false, false, data.to_vec());
    }

    /// Add a file that refuses read/write opening
    pub fn add_read_only_file(&mut self, path: &str, size: usize) {
        self.push(path, false, true, vec![0u8; size]);
    }

    /// Add `count` files named `prefix00.dsk`, `prefix01.dsk`... under `dir`
    pub fn add_files(&mut self, dir: &str, prefix: &str, count: usize) {
        for i in 0..count {
            let path = alloc::format!("{}/{}{:02}.dsk", dir, prefix, i);
            self.add_file(&path, 512 + i);
        }
    }

    /// Make `open_dir(path)` fail
    pub fn fail_open_dir(&mut self, path: &str) {
        self.failing_dirs.push(path.to_string());
    }

    /// Make `open_file(path)` fail with a disk error
    pub fn fail_open_file(&mut self, path: &str) {
        self.failing_files.push(path.to_string());
    }

    /// Make reads on `path` fail once `ok_reads` entries were returned
    pub fn fail_reads_after(&mut self, path: &str, ok_reads: usize) {
        self.read_faults.push((path.to_string(), ok_reads));
    }

    /// Refuse to open more than `limit` directories at once
    pub fn limit_open_dirs(&mut self, limit: usize) {
        self.max_open_dirs = Some(limit);
    }

    /// Directory handles currently open
    pub fn open_dir_count(&self) -> usize {
        self.open_dirs
    }

    /// Most directory handles ever open at the same time
    pub fn peak_open_dirs(&self) -> usize {
        self.peak_open_dirs
    }

    /// Total successful `open_dir` calls
    pub fn dir_opens(&self) -> usize {
        self.dir_opens
    }

    /// Total `rewind_dir` calls
    pub fn rewinds(&self) -> usize {
        self.rewinds
    }

    fn push(&mut self, path: &str, is_dir: bool, read_only: bool, data: Vec<u8>) {
        self.nodes.push(Node {
            path: path.to_string(),
            is_dir,
            read_only,
            data: Rc::new(RefCell::new(data)),
        });
    }

    fn find(&self, path: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.path == path)
    }
}

impl FileSystem for MemFs {
    type Dir = MemDir;
    type File = MemFile;

    fn open_dir(&mut self, path: &str) -> Result<MemDir, FsError> {
        if self.failing_dirs.iter().any(|p| p == path) {
            return Err(FsError::Io);
        }
        if !path.is_empty() && !matches!(self.find(path), Some(node) if node.is_dir) {
            return Err(FsError::NoPath);
        }
        if let Some(limit) = self.max_open_dirs {
            if self.open_dirs >= limit {
                return Err(FsError::TooManyOpenFiles);
            }
        }

        self.open_dirs += 1;
        self.peak_open_dirs = self.peak_open_dirs.max(self.open_dirs);
        self.dir_opens += 1;

        Ok(MemDir {
            path: path.to_string(),
            next: 0,
            reads: 0,
        })
    }

    fn read_dir(&mut self, dir: &mut MemDir) -> Result<Option<DirectoryEntry>, FsError> {
        let fault = self
            .read_faults
            .iter()
            .find(|(p, _)| *p == dir.path)
            .map(|(_, n)| *n);
        if let Some(ok_reads) = fault {
            if dir.reads >= ok_reads {
                return Err(FsError::Io);
            }
        }

        let child = self
            .nodes
            .iter()
            .filter(|n| n.parent() == dir.path && n.path != dir.path)
            .nth(dir.next);

        match child {
            Some(node) => {
                dir.next += 1;
                dir.reads += 1;
                Ok(Some(DirectoryEntry::new(node.name(), node.is_dir)))
            }
            None => Ok(None),
        }
    }

    fn rewind_dir(&mut self, dir: &mut MemDir) -> Result<(), FsError> {
        self.rewinds += 1;
        dir.next = 0;
        dir.reads = 0;
        Ok(())
    }

    fn close_dir(&mut self, _dir: MemDir) {
        self.open_dirs = self.open_dirs.saturating_sub(1);
    }

    fn open_file(&mut self, path: &str) -> Result<MemFile, FsError> {
        if self.failing_files.iter().any(|p| p == path) {
            return Err(FsError::Io);
        }
        let node = self.find(path).ok_or(FsError::NotFound)?;
        if node.is_dir {
            return Err(FsError::NotFound);
        }
        if node.read_only {
            return Err(FsError::Denied);
        }
        Ok(MemFile {
            path: node.path.clone(),
            data: Rc::clone(&node.data),
            pos: 0,
        })
    }
}

/// Key source replaying a fixed script
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    queue: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a press followed by its release
    pub fn tap(mut self, code: u8) -> Self {
        self.queue.push_back(KeyEvent::press(code));
        self.queue.push_back(KeyEvent::release(code));
        self
    }

    /// Queue `count` taps of the same key
    pub fn taps(mut self, code: u8, count: usize) -> Self {
        for _ in 0..count {
            self = self.tap(code);
        }
        self
    }

    /// Queue a raw keyboard word
    pub fn raw(mut self, raw: u16) -> Self {
        self.queue.push_back(KeyEvent::from_raw(raw));
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl KeySource for ScriptedKeys {
    fn pop(&mut self) -> Option<KeyEvent> {
        self.queue.pop_front()
    }
}
