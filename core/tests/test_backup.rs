use flockweigh_core::{BackupSlot, FlockError, WeightSet, WeightSlot};

fn sample_set() -> WeightSet {
    WeightSet::from_values(&[2.10, 2.30, 2.50]).unwrap()
}

#[test]
fn snapshot_then_restore_is_one_shot() {
    let mut slot = BackupSlot::new();
    let mut set = sample_set();

    assert!(slot.snapshot(&set));
    set.set(0, WeightSlot::Value(9.98)).unwrap();

    slot.restore(&mut set).expect("first restore");
    assert_eq!(set, sample_set());
    assert!(!slot.is_present());

    let err = slot.restore(&mut set).unwrap_err();
    assert_eq!(err, FlockError::NoBackup);
    assert_eq!(err.to_string(), "no backup available");
}

#[test]
fn only_first_snapshot_is_kept() {
    let mut slot = BackupSlot::new();
    let mut set = sample_set();

    assert!(slot.snapshot(&set));
    set.set(1, WeightSlot::Value(3.00)).unwrap();
    assert!(!slot.snapshot(&set), "andre snapshot skal ignoreres");

    let b = slot.get().unwrap();
    assert_eq!(b.weights, sample_set());
    assert_eq!(b.unit_count(), 3);
}

#[test]
fn restore_brings_back_unit_count() {
    let mut slot = BackupSlot::new();
    let mut set = sample_set();
    slot.snapshot(&set);

    set.resize(6).unwrap();
    assert_eq!(set.unit_count(), 6);

    slot.restore(&mut set).unwrap();
    assert_eq!(set.unit_count(), 3);
}

#[test]
fn discard_drops_backup_without_restoring() {
    let mut slot = BackupSlot::new();
    let mut set = sample_set();
    slot.snapshot(&set);
    set.clear();

    slot.discard().unwrap();
    assert!(!slot.is_present());
    assert_eq!(set.valid_count(), 0);
    assert_eq!(slot.discard().unwrap_err(), FlockError::NoBackup);
    assert_eq!(slot.restore(&mut set).unwrap_err(), FlockError::NoBackup);
}

#[test]
fn clear_is_silent() {
    let mut slot = BackupSlot::new();
    slot.clear();
    slot.snapshot(&sample_set());
    slot.clear();
    assert!(slot.get().is_none());
}
