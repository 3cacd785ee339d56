use std::io;
use std::thread;

use anyhow::{Context, Result};
use imgsynth_composer::CancelFlag;

#[cfg(unix)]
type InterruptStream = tokio::signal::unix::Signal;
#[cfg(windows)]
type InterruptStream = tokio::signal::windows::CtrlC;

/// Register for Ctrl-C; must be called inside a runtime context
#[cfg(unix)]
fn listen() -> io::Result<InterruptStream> {
    use tokio::signal::unix::{signal, SignalKind};
    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn listen() -> io::Result<InterruptStream> {
    tokio::signal::windows::ctrl_c()
}

/// Listen for Ctrl-C on a background thread
///
/// The handler is registered before this returns, so an interrupt that
/// arrives while the listener thread is still starting is not lost. The
/// first interrupt raises `flag` so the composer stops after the image it is
/// working on; a second one exits immediately.
pub fn install_interrupt_handler(flag: CancelFlag) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start interrupt listener")?;

    let mut interrupts = {
        let _guard = runtime.enter();
        listen().context("failed to register interrupt handler")?
    };

    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                if interrupts.recv().await.is_none() {
                    return;
                }
                log::info!("Interrupt received, finishing the current image");
                flag.cancel();

                if interrupts.recv().await.is_some() {
                    println!("Interrupted");
                    std::process::exit(130);
                }
            });
        })
        .context("failed to spawn interrupt listener")?;

    Ok(())
}
