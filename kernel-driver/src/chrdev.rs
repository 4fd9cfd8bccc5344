//! Character-device major table.
//!
//! A [`HostKernel`] that behaves like the kernel's `chrdevs` map:
//!
//!  * major 0 asks for a dynamic major, handed out from 254 down to 234 and
//!    then from 511 down to 384;
//!  * a fixed major can be claimed once;
//!  * `open` routes to the operations registered under a major and returns
//!    an [`OpenFile`] that releases itself exactly once.

use alloc::{collections::BTreeMap, string::String, sync::Arc};
use core::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use shared::constants::CHRDEV_MAJOR_MAX;
use shared::{Errno, KResult};
use spin::Mutex;

use crate::dispatch::{File, FileOperations, HostKernel};
use crate::uaccess::{UserSliceReader, UserSliceWriter};

/// Dynamic major ranges, searched top-down in this order.
const DYNAMIC_MAJORS: [(u32, u32); 2] = [(234, 254), (384, 511)];

struct Registered {
    name: String,
    fops: Arc<dyn FileOperations>,
}

pub struct ChrdevTable {
    majors: Mutex<BTreeMap<u32, Registered>>,
    next_file_id: AtomicU64,
}

impl ChrdevTable {
    pub const fn new() -> Self {
        Self {
            majors: Mutex::new(BTreeMap::new()),
            next_file_id: AtomicU64::new(1),
        }
    }

    pub fn is_registered(&self, major: u32) -> bool {
        self.majors.lock().contains_key(&major)
    }

    pub fn name_of(&self, major: u32) -> Option<String> {
        self.majors.lock().get(&major).map(|r| r.name.clone())
    }

    /// Number of majors currently registered.
    pub fn len(&self) -> usize {
        self.majors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open `major:minor` and run the driver's `open` callback.
    pub fn open(&self, major: u32, minor: u32) -> KResult<OpenFile> {
        let fops = match self.majors.lock().get(&major) {
            Some(r) => r.fops.clone(),
            None => return Err(Errno::ENXIO),
        };

        let file = File {
            id: self.next_file_id.fetch_add(1, Ordering::Relaxed),
            major,
            minor,
        };
        fops.open(&file)?;
        debug!("opened {}:{} as file {}", major, minor, file.id);

        Ok(OpenFile { file, fops, pos: 0, released: false })
    }

    fn dynamic_major(map: &BTreeMap<u32, Registered>) -> Option<u32> {
        DYNAMIC_MAJORS
            .iter()
            .flat_map(|&(lo, hi)| (lo..=hi).rev())
            .find(|m| !map.contains_key(m))
    }
}

impl Default for ChrdevTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HostKernel for ChrdevTable {
    fn register_chrdev(
        &self,
        major: u32,
        name: &str,
        fops: Arc<dyn FileOperations>,
    ) -> KResult<u32> {
        if name.is_empty() || major >= CHRDEV_MAJOR_MAX {
            return Err(Errno::EINVAL);
        }

        let mut map = self.majors.lock();
        let major = if major == 0 {
            Self::dynamic_major(&map).ok_or(Errno::EBUSY)?
        } else if map.contains_key(&major) {
            return Err(Errno::EBUSY);
        } else {
            major
        };

        map.insert(major, Registered { name: String::from(name), fops });
        debug!("major {} registered as {}", major, name);
        Ok(major)
    }

    fn unregister_chrdev(&self, major: u32, name: &str) {
        let mut map = self.majors.lock();
        match map.get(&major) {
            Some(r) if r.name == name => {
                map.remove(&major);
                debug!("major {} ({}) unregistered", major, name);
            }
            Some(r) => warn!(
                "unregister of major {} as {} ignored: registered as {}",
                major, name, r.name
            ),
            None => warn!("unregister of free major {} ({}) ignored", major, name),
        }
    }
}

/*──────────────────────────── open file ─────────────────────────────────*/

/// One open file description. Keeps the driver's operations alive even if
/// the major is unregistered while the file is open.
pub struct OpenFile {
    file: File,
    fops: Arc<dyn FileOperations>,
    pos: u64,
    released: bool,
}

impl OpenFile {
    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn read(&mut self, buf: &mut dyn UserSliceWriter) -> KResult<usize> {
        self.fops.read(&self.file, buf, &mut self.pos)
    }

    pub fn write(&mut self, buf: &mut dyn UserSliceReader) -> KResult<usize> {
        self.fops.write(&self.file, buf, &mut self.pos)
    }

    /// Release the file and report the driver's result.
    pub fn close(mut self) -> KResult<()> {
        self.release()
    }

    fn release(&mut self) -> KResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.fops.release(&self.file)
    }
}

impl Drop for OpenFile {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("release of file {} failed: {}", self.file.id, e);
        }
    }
}
