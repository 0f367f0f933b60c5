//! Host resource sampling
//!
//! Real sampling goes through sysinfo when the `metrics` feature is enabled.
//! Without it the sampler reports an error and callers skip the snapshot.

use super::types::ResourceUsage;
use crate::utils::error::Result;
use std::fmt::Debug;
use std::sync::Arc;

/// Source of CPU, memory, disk and network readings
pub trait ResourceSampler: Send + Sync + Debug {
    fn sample(&self) -> Result<ResourceUsage>;
}

/// Sampler used when none is injected
pub fn default_sampler() -> Arc<dyn ResourceSampler> {
    #[cfg(feature = "metrics")]
    {
        Arc::new(SysinfoSampler::new())
    }
    #[cfg(not(feature = "metrics"))]
    {
        Arc::new(UnavailableSampler)
    }
}

#[cfg(feature = "metrics")]
pub use sysinfo_sampler::SysinfoSampler;

#[cfg(feature = "metrics")]
mod sysinfo_sampler {
    use super::ResourceSampler;
    use crate::monitoring::metrics::types::{
        DiskUsage, MemoryUsage, NetworkCounters, ResourceUsage,
    };
    use crate::utils::error::Result;
    use parking_lot::Mutex;
    use std::path::Path;
    use sysinfo::{Disks, Networks, System};

    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = MB * 1024.0;

    /// Sampler backed by sysinfo handles that are refreshed on every call
    #[derive(Debug)]
    pub struct SysinfoSampler {
        system: Mutex<System>,
        disks: Mutex<Disks>,
        networks: Mutex<Networks>,
    }

    impl SysinfoSampler {
        pub fn new() -> Self {
            Self {
                system: Mutex::new(System::new_all()),
                disks: Mutex::new(Disks::new_with_refreshed_list()),
                networks: Mutex::new(Networks::new_with_refreshed_list()),
            }
        }

        fn cpu_and_memory(&self) -> (f64, MemoryUsage) {
            let mut sys = self.system.lock();
            sys.refresh_cpu_usage();
            sys.refresh_memory();

            let total = sys.total_memory() as f64;
            let used = sys.used_memory() as f64;
            let memory = MemoryUsage {
                total_mb: total / MB,
                used_mb: used / MB,
                available_mb: sys.available_memory() as f64 / MB,
                percent: if total > 0.0 { used / total * 100.0 } else { 0.0 },
            };

            (sys.global_cpu_usage() as f64, memory)
        }

        /// Root filesystem, falling back to the largest mounted disk
        fn disk(&self) -> DiskUsage {
            let mut disks = self.disks.lock();
            disks.refresh_list();

            let disk = disks
                .iter()
                .find(|d| d.mount_point() == Path::new("/"))
                .or_else(|| disks.iter().max_by_key(|d| d.total_space()));

            match disk {
                Some(disk) => {
                    let total = disk.total_space() as f64;
                    let free = disk.available_space() as f64;
                    let used = (total - free).max(0.0);
                    DiskUsage {
                        total_gb: total / GB,
                        used_gb: used / GB,
                        free_gb: free / GB,
                        percent: if total > 0.0 { used / total * 100.0 } else { 0.0 },
                    }
                }
                None => DiskUsage::default(),
            }
        }

        fn network(&self) -> NetworkCounters {
            let mut networks = self.networks.lock();
            networks.refresh();

            networks
                .values()
                .fold(NetworkCounters::default(), |mut acc, data| {
                    acc.bytes_sent += data.total_transmitted();
                    acc.bytes_recv += data.total_received();
                    acc.packets_sent += data.total_packets_transmitted();
                    acc.packets_recv += data.total_packets_received();
                    acc
                })
        }
    }

    impl Default for SysinfoSampler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ResourceSampler for SysinfoSampler {
        fn sample(&self) -> Result<ResourceUsage> {
            let (cpu_percent, memory) = self.cpu_and_memory();
            Ok(ResourceUsage {
                cpu_percent,
                memory,
                disk: self.disk(),
                network: self.network(),
            })
        }
    }
}

/// Sampler for builds without the `metrics` feature
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSampler;

impl ResourceSampler for UnavailableSampler {
    fn sample(&self) -> Result<ResourceUsage> {
        Err(crate::utils::error::GatewayError::sampling(
            "resource sampling requires the `metrics` feature",
        ))
    }
}

/// Sampler returning a preset reading; `None` makes every sample fail
#[derive(Debug, Default)]
pub struct StaticSampler {
    usage: parking_lot::Mutex<Option<ResourceUsage>>,
}

impl StaticSampler {
    pub fn new(usage: ResourceUsage) -> Self {
        Self {
            usage: parking_lot::Mutex::new(Some(usage)),
        }
    }

    /// Reading with the given CPU, memory and disk percentages
    pub fn with_load(cpu_percent: f64, memory_percent: f64, disk_percent: f64) -> Self {
        let mut usage = ResourceUsage {
            cpu_percent,
            ..Default::default()
        };
        usage.memory.percent = memory_percent;
        usage.disk.percent = disk_percent;
        Self::new(usage)
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn set(&self, usage: Option<ResourceUsage>) {
        *self.usage.lock() = usage;
    }
}

impl ResourceSampler for StaticSampler {
    fn sample(&self) -> Result<ResourceUsage> {
        self.usage.lock().clone().ok_or_else(|| {
            crate::utils::error::GatewayError::sampling("no reading configured")
        })
    }
}
