/// Filesystem types excluded from disk metrics.
const PSEUDO_FILESYSTEMS: &[&str] = &[
    "tmpfs",
    "devtmpfs",
    "sysfs",
    "proc",
    "cgroup",
    "cgroup2",
    "overlay",
    "squashfs",
    "efivarfs",
    "bpf",
    "hugetlbfs",
    "mqueue",
    "pstore",
    "securityfs",
    "debugfs",
    "tracefs",
    "fusectl",
    "rpc_pipefs",
    "autofs",
    "devfs",
];

/// True for kernel/virtual filesystems that do not represent real storage.
#[must_use]
pub fn is_pseudo_filesystem(fs: &str) -> bool {
    PSEUDO_FILESYSTEMS.contains(&fs)
}
