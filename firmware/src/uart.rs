//! Serial transport towards the gateway.
//!
//! Every task that has something to say pushes a [`Report`] into a shared
//! queue; a single task renders and writes them to USART2 one line at a
//! time, so lines never interleave.

use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embedded_io_async::Write;
use pushbutton::Report;

/// Reports waiting to be written.
///
/// Deep enough for a click burst while a slow line is still going out.
const REPORT_QUEUE_DEPTH: usize = 8;

static REPORTS: Channel<CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH> = Channel::new();

/// Queues a report for the UART task.
///
/// Drops the report when the queue is full rather than stalling the caller.
pub fn publish(report: Report) {
    if REPORTS.try_send(report).is_err() {
        #[cfg(feature = "debug-mode")]
        defmt::warn!("Report queue full, dropping {}", report);
    }
}

/// Async task writing queued reports to the UART.
///
/// # Arguments
///
/// * `tx` - UART transmitter (takes ownership)
#[embassy_executor::task]
pub async fn uart_task(mut tx: UartTx<'static, Async>) {
    loop {
        let report = REPORTS.receive().await;

        let Ok(line) = report.to_line() else {
            #[cfg(feature = "debug-mode")]
            defmt::warn!("Report does not fit a line: {}", report);
            continue;
        };

        #[cfg(feature = "debug-mode")]
        defmt::info!("UART <- {}", line.as_str());

        if let Err(_e) = tx.write_all(line.as_bytes()).await {
            #[cfg(feature = "debug-mode")]
            defmt::warn!("UART write failed: {}", _e);
        }
    }
}
