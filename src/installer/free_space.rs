use std::path::Path;

use sysinfo::Disks;

/// Get available free disk space by specified path
///
/// Can return `None` if the path is not prefixed by any mounted disk
pub fn available(path: impl AsRef<Path>) -> Option<u64> {
    let disks = Disks::new_with_refreshed_list();

    // Nested mount points require matching the longest prefix
    disks.list().iter()
        .filter(|disk| path.as_ref().starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .map(|disk| disk.available_space())
}
