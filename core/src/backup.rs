use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FlockError, FlockResult};
use crate::metrics;
use crate::models::WeightSet;

/// Ett-nivås angre: settet slik det var før første destruktive omskriving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub weights: WeightSet,
    pub taken_at: DateTime<Utc>,
}

impl Backup {
    pub fn unit_count(&self) -> usize {
        self.weights.unit_count()
    }
}

/// Holdes av kalleren ved siden av settet. Maks én backup om gangen;
/// restore og discard forbruker den.
#[derive(Debug, Clone, Default)]
pub struct BackupSlot {
    inner: Option<Backup>,
}

impl BackupSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&Backup> {
        self.inner.as_ref()
    }

    /// Tar øyeblikksbilde kun hvis ingen backup finnes. Returnerer om et nytt ble tatt.
    pub fn snapshot(&mut self, weights: &WeightSet) -> bool {
        if self.inner.is_some() {
            return false;
        }
        self.inner = Some(Backup {
            weights: weights.clone(),
            taken_at: Utc::now(),
        });
        metrics::backup_event("snapshot");
        log::debug!("backup taken ({} units)", weights.unit_count());
        true
    }

    /// Erstatter `weights` med øyeblikksbildet og tømmer plassen.
    pub fn restore(&mut self, weights: &mut WeightSet) -> FlockResult<()> {
        let backup = self.inner.take().ok_or(FlockError::NoBackup)?;
        log::info!(
            "restoring backup from {} ({} units)",
            backup.taken_at.to_rfc3339(),
            backup.unit_count()
        );
        *weights = backup.weights;
        metrics::backup_event("restore");
        Ok(())
    }

    /// Forkaster backupen uten å gjenopprette. Kan ikke angres.
    pub fn discard(&mut self) -> FlockResult<()> {
        self.inner.take().ok_or(FlockError::NoBackup)?;
        metrics::backup_event("discard");
        log::info!("backup discarded");
        Ok(())
    }

    /// Stille tømming når settet byttes ut (last/tøm tabell).
    pub fn clear(&mut self) {
        if self.inner.take().is_some() {
            metrics::backup_event("cleared");
        }
    }
}
