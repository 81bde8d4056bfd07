//! Memory usage of the running process.
#[cfg(test)]
use mockall::automock;
use sysinfo::System;

use super::Error;

/// Memory figures in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MemorySnapshot {
    /// Resident set size of this process.
    pub rss: u64,
    /// Virtual memory of this process.
    pub virtual_memory: u64,
    /// Total memory of the host.
    pub system_total: u64,
    /// Memory in use on the host.
    pub system_used: u64,
}

impl MemorySnapshot {
    /// Samples the memory of the current process and the host.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the current process can not be inspected.
    pub fn capture() -> Result<Self, Error> {
        let pid = sysinfo::get_current_pid().map_err(|message| Error::ProcessInfo {
            message: message.to_owned(),
        })?;

        let mut system = System::new();
        system.refresh_memory();

        if !system.refresh_process(pid) {
            return Err(Error::ProcessInfo {
                message: format!("process {pid} not found"),
            });
        }

        let process = system.process(pid).ok_or_else(|| Error::ProcessInfo {
            message: format!("process {pid} not found"),
        })?;

        Ok(Self {
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
            system_total: system.total_memory(),
            system_used: system.used_memory(),
        })
    }
}

/// Source of the memory figures of the health report.
#[cfg_attr(test, automock)]
pub trait MemorySampler: Sync + Send {
    /// # Errors
    ///
    /// Will return `Err` if the memory can not be sampled.
    fn sample(&self) -> Result<MemorySnapshot, Error>;
}

/// Samples the current process with [`MemorySnapshot::capture`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessMemory;

impl MemorySampler for ProcessMemory {
    fn sample(&self) -> Result<MemorySnapshot, Error> {
        MemorySnapshot::capture()
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySnapshot;

    #[test]
    fn it_should_sample_the_memory_of_the_current_process() {
        let snapshot = MemorySnapshot::capture().unwrap();

        assert!(snapshot.rss > 0);
        assert!(snapshot.system_total >= snapshot.system_used);
    }
}
