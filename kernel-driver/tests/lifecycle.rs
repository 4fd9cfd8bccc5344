//! Load / unload of the echo module against the in-crate host kernel.

use std::sync::Arc;

use echodev_driver::{
    ChrdevTable, EchoModule, Errno, FileOperations, HostKernel, KResult, MODULE_INFO,
    Registration,
};

struct Nop;
impl FileOperations for Nop {}

/// Host that refuses every registration, like a kernel out of majors.
struct FullHost;

impl HostKernel for FullHost {
    fn register_chrdev(&self, _: u32, _: &str, _: Arc<dyn FileOperations>) -> KResult<u32> {
        Err(Errno::EBUSY)
    }
    fn unregister_chrdev(&self, _: u32, _: &str) {
        panic!("nothing was registered");
    }
}

#[test]
fn load_registers_echodev_with_dynamic_major() {
    let table = Arc::new(ChrdevTable::new());
    let module = EchoModule::init(table.clone()).unwrap();

    assert_eq!(module.major(), 254);
    assert_eq!(table.name_of(module.major()).as_deref(), Some("echodev"));
    assert_eq!(module.info().name, "echodev");
    assert_eq!(MODULE_INFO.license, "GPL");
}

#[test]
fn unload_frees_the_major() {
    let table = Arc::new(ChrdevTable::new());
    let module = EchoModule::init(table.clone()).unwrap();
    let major = module.major();

    module.exit();
    assert!(!table.is_registered(major));
    assert!(table.is_empty());

    // the freed major is handed out again on the next load
    let again = EchoModule::init(table.clone()).unwrap();
    assert_eq!(again.major(), major);
}

#[test]
fn second_load_gets_its_own_major() {
    let table = Arc::new(ChrdevTable::new());
    let first = EchoModule::init(table.clone()).unwrap();
    let second = EchoModule::init(table.clone()).unwrap();
    assert_ne!(first.major(), second.major());
    assert_eq!(table.len(), 2);
}

#[test]
fn load_failure_returns_host_error() {
    assert_eq!(EchoModule::init(FullHost).err(), Some(Errno::EBUSY));
}

#[test]
fn registration_guard_unregisters_on_drop() {
    let table = Arc::new(ChrdevTable::new());
    let reg = Registration::new(table.clone(), "guarded", Arc::new(Nop)).unwrap();
    assert_eq!(reg.name(), "guarded");
    assert!(table.is_registered(reg.major()));

    let major = reg.major();
    drop(reg);
    assert!(!table.is_registered(major));
}

#[test]
fn module_state_does_not_survive_reload() {
    let table = Arc::new(ChrdevTable::new());
    let module = EchoModule::init(table.clone()).unwrap();
    {
        let mut file = table.open(module.major(), 0).unwrap();
        file.write(&mut echodev_driver::SliceReader::new(b"bye")).unwrap();
    }
    assert!(module.device().pending() > 0);
    module.exit();

    let module = EchoModule::init(table.clone()).unwrap();
    assert_eq!(module.device().pending(), 0);
}
