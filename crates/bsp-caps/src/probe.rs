use crate::capability::Capability;
use crate::process::ProcessCaps;

/// A single capability check with the ability it grants
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub cap: Capability,
    pub ability: &'static str,
}

pub const NET_PROBES: [Probe; 2] = [
    Probe {
        cap: Capability::NetRaw,
        ability: "create raw sockets",
    },
    Probe {
        cap: Capability::NetAdmin,
        ability: "perform network administration",
    },
];

pub const TIME_PROBES: [Probe; 1] = [Probe {
    cap: Capability::SysTime,
    ability: "set system time",
}];

impl Probe {
    pub fn heading(&self) -> String {
        format!("=== Testing {} ===", self.cap)
    }

    pub fn report(&self, caps: &ProcessCaps) -> String {
        if caps.has_effective(self.cap) {
            format!("\u{2713} {} is SET - Can {}", self.cap, self.ability)
        } else {
            format!("\u{2717} {} is NOT SET - Cannot {}", self.cap, self.ability)
        }
    }
}

pub fn usage(progname: &str) -> String {
    format!(
        "Linux Capabilities Demo
Usage: {p} [command]

Commands:
  show         Show all current capabilities (default)
  list         List all effective capabilities
  test-net     Test network-related capabilities
  test-time    Test CAP_SYS_TIME capability
  info         Show process and user information
  help         Show this help message

Examples:
  {p} show
  {p} list
  {p} test-net

Note: Run with specific capabilities using:
  sudo setcap cap_net_raw,cap_net_admin=ep {p}
  sudo setcap cap_sys_time=ep {p}
  getcap {p}  # Show assigned capabilities",
        p = progname
    )
}
