fn main() {
    if let Err(e) = minicc_drv::main() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
