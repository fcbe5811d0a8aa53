#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those     holding buffers for the duration of a data transfer."
)]

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::i2c::master::I2c;
use esp_hal::Async;
use esp_hal::{clock::CpuClock, time::Rate, timer::systimer::SystemTimer};
use esp_println::println;
use log::{error, info, warn};
use mpr121_async::Mpr121;
use mpr121x4::{Callback, Selector, TouchAction, TouchConfig, TouchRegistry};
use static_cell::StaticCell;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    println!("{}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

type Registry = TouchRegistry<
    CriticalSectionRawMutex,
    Mpr121<I2c<'static, Async>, esp_hal::i2c::master::Error, Delay>,
>;

static REGISTRY: StaticCell<Registry> = StaticCell::new();

fn on_play_touched() {
    info!("Play pad touched");
}

fn on_play_released() {
    info!("Play pad released");
}

fn on_keyboard_touched() {
    info!("Keyboard board touched");
}

/// The main entry point of the application.
#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("Peripherals initialized");

    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
    let touch_i2c = I2c::new(peripherals.I2C0, config)
        .unwrap()
        .with_sda(peripherals.GPIO13)
        .with_scl(peripherals.GPIO14)
        .into_async();

    let registry: &'static Registry = REGISTRY.init(TouchRegistry::new(
        Mpr121::new(touch_i2c, Delay),
        TouchConfig::default(),
    ));

    spawner.spawn(scan_touch(registry)).unwrap();

    // Board 0 (ADDR to GND): a transport pad on electrode 0.
    // Board 1 (ADDR to 3V3): twelve keyboard pads.
    let registrations: [(u8, Selector, TouchAction, Callback); 3] = [
        (0, Selector::Sensor(0), TouchAction::Touched, &on_play_touched),
        (0, Selector::Sensor(0), TouchAction::Released, &on_play_released),
        (1, Selector::Any, TouchAction::Touched, &on_keyboard_touched),
    ];
    for (board, selector, action, callback) in registrations {
        if let Err(err) = registry.on_touch(board, selector, action, callback).await {
            warn!("Error registering handler on board {board}: {err:?}");
        }
    }

    info!("Touch handlers registered. Entering idle loop.");
    loop {
        match registry.consume_unread_touch(1).await {
            Ok(true) => {
                if let Ok(Some(sensor)) = registry.last_touched_index(1).await {
                    info!("Keyboard: last sensor {sensor}");
                }
            }
            Ok(false) => {}
            Err(err) => error!("Error querying keyboard board: {err:?}"),
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}

/// The scan loop. Returns only on a bus error.
#[embassy_executor::task]
async fn scan_touch(registry: &'static Registry) {
    if let Err(err) = registry.run(Delay).await {
        error!("Touch scanner stopped: {err:?}");
    }
}
