//! Antiphon - Store-and-forward UART echo firmware
//!
//! Main firmware binary for RP2040 boards. Listens on a dedicated UART,
//! records each incoming message to a flash-backed slot, and echoes it
//! back to the sender.
//!
//! Named after the Greek "antiphon" (ἀντίφωνον), the verse sung in
//! answer - whatever arrives on the line is recorded and sung back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_sync::mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use antiphon_hal_rp2040::{
    line_to_config, LineConfig, Rp2040SerialRx, Rp2040SerialTx, Rp2040SlotStore,
};

mod channels;
mod config;
mod tasks;

use crate::channels::SharedSlot;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; config::UART_TX_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; config::UART_RX_BUF_SIZE]> = StaticCell::new();

// The slot store outlives main so both link tasks can borrow it
static SLOT: StaticCell<SharedSlot> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Antiphon firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Link UART: 2400 8N1 on GPIO4 (TX) / GPIO5 (RX), no flow control.
    // The debug console is defmt over RTT, a different wire entirely.
    let line = LineConfig::default();

    let tx_buf = TX_BUF.init([0u8; config::UART_TX_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; config::UART_RX_BUF_SIZE]);

    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, line_to_config(&line));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Link UART initialized at {} baud", line.baudrate);

    // One slot store for the whole process, handed to both tasks
    let slot = SLOT.init(Mutex::new(Rp2040SlotStore::new(p.FLASH, p.DMA_CH0)));
    info!("Slot partition opened");

    // TX first so the boot drain runs before the first receive completes
    spawner
        .spawn(tasks::link_tx_task(Rp2040SerialTx::new(tx), slot))
        .unwrap();
    spawner
        .spawn(tasks::link_rx_task(Rp2040SerialRx::new(rx), slot))
        .unwrap();

    info!("Antiphon link listening");
}
