use std::fmt;
use std::str::FromStr;

/// Capability numbers as defined in `linux/capability.h`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Chown = 0,
    DacOverride = 1,
    DacReadSearch = 2,
    Fowner = 3,
    Fsetid = 4,
    Kill = 5,
    Setgid = 6,
    Setuid = 7,
    Setpcap = 8,
    LinuxImmutable = 9,
    NetBindService = 10,
    NetBroadcast = 11,
    NetAdmin = 12,
    NetRaw = 13,
    IpcLock = 14,
    IpcOwner = 15,
    SysModule = 16,
    SysRawio = 17,
    SysChroot = 18,
    SysPtrace = 19,
    SysPacct = 20,
    SysAdmin = 21,
    SysBoot = 22,
    SysNice = 23,
    SysResource = 24,
    SysTime = 25,
    SysTtyConfig = 26,
    Mknod = 27,
    Lease = 28,
    AuditWrite = 29,
    AuditControl = 30,
    Setfcap = 31,
    MacOverride = 32,
    MacAdmin = 33,
    Syslog = 34,
    WakeAlarm = 35,
    BlockSuspend = 36,
    AuditRead = 37,
    Perfmon = 38,
    Bpf = 39,
    CheckpointRestore = 40,
}

use Capability::*;

/// Every capability this crate knows, in numeric order
pub static ALL: [Capability; 41] = [
    Chown,
    DacOverride,
    DacReadSearch,
    Fowner,
    Fsetid,
    Kill,
    Setgid,
    Setuid,
    Setpcap,
    LinuxImmutable,
    NetBindService,
    NetBroadcast,
    NetAdmin,
    NetRaw,
    IpcLock,
    IpcOwner,
    SysModule,
    SysRawio,
    SysChroot,
    SysPtrace,
    SysPacct,
    SysAdmin,
    SysBoot,
    SysNice,
    SysResource,
    SysTime,
    SysTtyConfig,
    Mknod,
    Lease,
    AuditWrite,
    AuditControl,
    Setfcap,
    MacOverride,
    MacAdmin,
    Syslog,
    WakeAlarm,
    BlockSuspend,
    AuditRead,
    Perfmon,
    Bpf,
    CheckpointRestore,
];

/// The original 32 capabilities (CAP_CHOWN through CAP_SETFCAP)
pub static CLASSIC: &[Capability] = ALL.split_at(32).0;

impl Capability {
    pub const LAST: Capability = CheckpointRestore;

    pub fn from_index(index: u8) -> Option<Self> {
        ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u64 {
        1u64 << self.index()
    }

    /// Kernel name, e.g. `CAP_NET_RAW`
    pub fn name(self) -> &'static str {
        match self {
            Chown => "CAP_CHOWN",
            DacOverride => "CAP_DAC_OVERRIDE",
            DacReadSearch => "CAP_DAC_READ_SEARCH",
            Fowner => "CAP_FOWNER",
            Fsetid => "CAP_FSETID",
            Kill => "CAP_KILL",
            Setgid => "CAP_SETGID",
            Setuid => "CAP_SETUID",
            Setpcap => "CAP_SETPCAP",
            LinuxImmutable => "CAP_LINUX_IMMUTABLE",
            NetBindService => "CAP_NET_BIND_SERVICE",
            NetBroadcast => "CAP_NET_BROADCAST",
            NetAdmin => "CAP_NET_ADMIN",
            NetRaw => "CAP_NET_RAW",
            IpcLock => "CAP_IPC_LOCK",
            IpcOwner => "CAP_IPC_OWNER",
            SysModule => "CAP_SYS_MODULE",
            SysRawio => "CAP_SYS_RAWIO",
            SysChroot => "CAP_SYS_CHROOT",
            SysPtrace => "CAP_SYS_PTRACE",
            SysPacct => "CAP_SYS_PACCT",
            SysAdmin => "CAP_SYS_ADMIN",
            SysBoot => "CAP_SYS_BOOT",
            SysNice => "CAP_SYS_NICE",
            SysResource => "CAP_SYS_RESOURCE",
            SysTime => "CAP_SYS_TIME",
            SysTtyConfig => "CAP_SYS_TTY_CONFIG",
            Mknod => "CAP_MKNOD",
            Lease => "CAP_LEASE",
            AuditWrite => "CAP_AUDIT_WRITE",
            AuditControl => "CAP_AUDIT_CONTROL",
            Setfcap => "CAP_SETFCAP",
            MacOverride => "CAP_MAC_OVERRIDE",
            MacAdmin => "CAP_MAC_ADMIN",
            Syslog => "CAP_SYSLOG",
            WakeAlarm => "CAP_WAKE_ALARM",
            BlockSuspend => "CAP_BLOCK_SUSPEND",
            AuditRead => "CAP_AUDIT_READ",
            Perfmon => "CAP_PERFMON",
            Bpf => "CAP_BPF",
            CheckpointRestore => "CAP_CHECKPOINT_RESTORE",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = String;

    /// Accepts `CAP_NET_RAW`, `cap_net_raw` or `net_raw`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let wanted = upper.strip_prefix("CAP_").unwrap_or(&upper);
        ALL.iter()
            .copied()
            .find(|c| &c.name()[4..] == wanted)
            .ok_or_else(|| format!("unknown capability: {}", s))
    }
}
