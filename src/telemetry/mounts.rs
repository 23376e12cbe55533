// Mount table enumeration: drop pseudo filesystems and ephemeral system paths, dedup by path.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Kernel-exposed filesystems that carry no persistent storage capacity.
pub const PSEUDO_FS_TYPES: &[&str] = &[
    "autofs",
    "bpf",
    "cgroup",
    "cgroup2",
    "configfs",
    "debugfs",
    "devpts",
    "devtmpfs",
    "efivarfs",
    "fusectl",
    "hugetlbfs",
    "mqueue",
    "proc",
    "pstore",
    "ramfs",
    "securityfs",
    "sysfs",
    "tmpfs",
    "tracefs",
];

/// Mount roots for process, runtime, kernel, temp, device-node, container storage and snap packages.
pub const EPHEMERAL_PATH_PREFIXES: &[&str] = &[
    "/proc",
    "/run",
    "/sys",
    "/tmp",
    "/var/lib/docker",
    "/var/run",
    "/dev",
    "/snap",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub device: String,
    pub path: PathBuf,
    pub fs_type: String,
}

impl MountPoint {
    pub fn is_pseudo_filesystem(&self) -> bool {
        PSEUDO_FS_TYPES.contains(&self.fs_type.as_str())
    }

    pub fn is_ephemeral_path(&self) -> bool {
        EPHEMERAL_PATH_PREFIXES
            .iter()
            .any(|prefix| self.path.starts_with(prefix))
    }
}

/// Parse `device mountpoint fstype ...` rows. Rows with fewer than three fields are skipped.
pub fn parse_mount_table(table: &str) -> Vec<MountPoint> {
    table
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let path = fields.next()?;
            let fs_type = fields.next()?;
            Some(MountPoint {
                device: unescape(device),
                path: PathBuf::from(unescape(path)),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// Keep mounts that hold real storage, first occurrence per path.
///
/// `is_dir` decides whether the path currently resolves to a directory.
pub fn retain_real_mounts(
    mounts: Vec<MountPoint>,
    is_dir: impl Fn(&Path) -> bool,
) -> Vec<MountPoint> {
    let mut seen = HashSet::new();
    mounts
        .into_iter()
        .filter(|m| !m.is_pseudo_filesystem() && !m.is_ephemeral_path())
        .filter(|m| is_dir(m.path.as_path()))
        .filter(|m| seen.insert(m.path.clone()))
        .collect()
}

/// Decode the octal escapes the kernel uses for whitespace and backslashes (`\040`, `\011`, `\012`, `\134`).
fn unescape(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1..=i + 3].iter().all(|b| (b'0'..=b'7').contains(b))
        {
            let code = bytes[i + 1..=i + 3]
                .iter()
                .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
            if let Ok(byte) = u8::try_from(code) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_decodes_octal_space() {
        assert_eq!(unescape("/mnt/my\\040disk"), "/mnt/my disk");
        assert_eq!(unescape("/mnt/back\\134slash"), "/mnt/back\\slash");
    }

    #[test]
    fn unescape_leaves_plain_and_partial_escapes() {
        assert_eq!(unescape("/mnt/data"), "/mnt/data");
        assert_eq!(unescape("/mnt/x\\04"), "/mnt/x\\04");
        assert_eq!(unescape("/mnt/x\\9zz"), "/mnt/x\\9zz");
    }

    #[test]
    fn prefix_match_is_per_component() {
        let m = |p: &str| MountPoint {
            device: "/dev/sda1".into(),
            path: PathBuf::from(p),
            fs_type: "ext4".into(),
        };
        assert!(m("/run").is_ephemeral_path());
        assert!(m("/run/media/usb").is_ephemeral_path());
        assert!(!m("/runner").is_ephemeral_path());
        assert!(!m("/devdata").is_ephemeral_path());
        assert!(m("/var/lib/docker/overlay2/abc").is_ephemeral_path());
        assert!(!m("/var/lib").is_ephemeral_path());
    }
}
