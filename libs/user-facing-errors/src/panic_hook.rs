use std::panic::{self, PanicHookInfo};

/// Exit code of an engine process that panicked.
pub const PANIC_EXIT_CODE: i32 = 255;

/// Reports panics as a single [`crate::Error`] JSON line on stderr, then exits with
/// [`PANIC_EXIT_CODE`]. The previously installed hook only runs when rendering fails.
pub fn set_panic_hook() {
    let fallback = panic::take_hook();

    panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
        let error = crate::Error::new_in_panic_hook(info);

        if let Err(err) = error.write_json_line(std::io::stderr().lock()) {
            tracing::error!(%err, "panic could not be rendered as JSON");
            fallback(info);
        }

        std::process::exit(PANIC_EXIT_CODE)
    }));
}
