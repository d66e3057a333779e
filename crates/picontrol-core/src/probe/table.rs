//! Built-in metric table.
//!
//! Category -> ordered probe definitions. Commands are fixed strings; request
//! data only ever selects entries by name.

/// One probe: a command, a pattern over its stdout, and optional arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeDef {
    /// Metric name, or several comma-joined names sharing this probe.
    pub name: &'static str,
    pub command: &'static str,
    pub pattern: &'static str,
    /// Empty means "use the captured value verbatim".
    pub post: &'static str,
    /// `^`/`$` match at line boundaries.
    pub multiline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub probes: &'static [ProbeDef],
}

const fn probe(name: &'static str, command: &'static str, pattern: &'static str, post: &'static str) -> ProbeDef {
    ProbeDef {
        name,
        command,
        pattern,
        post,
        multiline: false,
    }
}

const fn probe_ml(name: &'static str, command: &'static str, pattern: &'static str, post: &'static str) -> ProbeDef {
    ProbeDef {
        name,
        command,
        pattern,
        post,
        multiline: true,
    }
}

const CPU_FREQ: &str = "test -r /sys/devices/system/cpu/cpufreq/policy0/cpuinfo_cur_freq && cat /sys/devices/system/cpu/cpufreq/policy0/cpuinfo_cur_freq || test -r /sys/devices/system/cpu/cpufreq/policy0/scaling_cur_freq && cat /sys/devices/system/cpu/cpufreq/policy0/scaling_cur_freq || echo -1000";
const MEMINFO: &str = "cat /proc/meminfo";

pub static METRIC_TABLE: &[Category] = &[
    Category {
        name: "cpu",
        probes: &[
            probe("cpu_frequency", CPU_FREQ, r"(.*)", "$1/1000"),
            probe("load1,load5,load15", "cat /proc/loadavg", r"^(\S+)\s(\S+)\s(\S+)", ""),
            probe(
                "scaling_governor",
                "cat /sys/devices/system/cpu/cpu0/cpufreq/scaling_governor",
                r"(.*)",
                "",
            ),
        ],
    },
    Category {
        name: "raspberry",
        probes: &[
            probe("cpu_voltage", "vcgencmd measure_volts core", r"(\d+.\d+)V", ""),
            probe("mem_arm", "vcgencmd get_mem arm", r"(\d+)", ""),
            probe("mem_gpu", "vcgencmd get_mem gpu", r"(\d+)", ""),
        ],
    },
    Category {
        name: "memory",
        probes: &[
            probe("memory_total", MEMINFO, r"MemTotal:\s+(\d+)", "$1/1024"),
            probe("memory_free", MEMINFO, r"MemFree:\s+(\d+)", "$1/1024"),
            probe_ml("memory_available", MEMINFO, r"MemAvailable:\s+(\d+)", "$1/1024"),
        ],
    },
    Category {
        name: "network",
        probes: &[
            probe("net_received", "cat /sys/class/net/eth0/statistics/rx_bytes", r"(.*)", "$1*-1"),
            probe("net_send", "cat /sys/class/net/eth0/statistics/tx_bytes", r"(.*)", ""),
        ],
    },
    Category {
        name: "sdcard",
        probes: &[
            probe_ml("sdcard_root_total", "df /", r"\S+\s+(\d+).*/$", "$1/1024"),
            probe_ml("sdcard_boot_total", "df /boot", r"\S+\s+(\d+).*/boot$", "$1/1024"),
            probe_ml("sdcard_root_used", "df /", r"\S+\s+\d+\s+(\d+).*/$", "$1/1024"),
            probe_ml("sdcard_boot_used", "df /boot", r"\S+\s+\d+\s+(\d+).*/boot$", "$1/1024"),
        ],
    },
    Category {
        name: "swap",
        probes: &[
            probe_ml("swap_total", MEMINFO, r"SwapTotal:\s+(\d+)", "$1/1024"),
            // Reports SwapFree under the "used" name; no subtraction from the total.
            probe_ml("swap_used", MEMINFO, r"SwapFree:\s+(\d+)", "$1/1024"),
        ],
    },
    Category {
        name: "temperature",
        probes: &[probe(
            "soc_temp",
            "cat /sys/devices/virtual/thermal/thermal_zone0/temp",
            r"(.*)",
            "$1/1000",
        )],
    },
    Category {
        name: "uptime",
        probes: &[probe("uptime", "cat /proc/uptime", r"(^\S+)", "")],
    },
    Category {
        name: "wlan",
        probes: &[
            probe("wifi_received", "cat /sys/class/net/wlan0/statistics/rx_bytes", r"(.*)", "$1*-1"),
            probe("wifi_send", "cat /sys/class/net/wlan0/statistics/tx_bytes", r"(.*)", ""),
        ],
    },
];

/// Find a category of the built-in table by name.
pub fn lookup(category: &str) -> Option<&'static Category> {
    METRIC_TABLE.iter().find(|c| c.name == category)
}
