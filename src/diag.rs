/*
 * Best-effort console diagnostics. A host that already has a console gets a
 * `log` sink printing to it; a host without one gets silence. The library
 * never allocates a console of its own, and logging never gates correctness.
 */
use windows::Win32::System::Console::GetConsoleWindow;

struct ConsoleSink;

static SINK: ConsoleSink = ConsoleSink;

impl log::Log for ConsoleSink {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!("[darkdialogs] {:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the sink when an attached console exists. Safe to call once per
/// process; a host that already installed a global logger wins.
pub(crate) fn init() {
    if unsafe { GetConsoleWindow() }.is_invalid() {
        return;
    }
    if log::set_logger(&SINK).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
