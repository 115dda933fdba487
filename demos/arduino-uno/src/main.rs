#![no_std]
#![no_main]

use arduino_hal::prelude::*;
use panic_halt as _;
use sda5708::{Config, Glyph, SDA5708};

const DEFAULT_BRIGHTNESS: u8 = 5;
const SMILE: u8 = 0x01;
const SMILE_GLYPH: Glyph = [0b00000, 0b01010, 0b00000, 0b00000, 0b10001, 0b01110, 0b00000];

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let config = Config::default().with_brightness(DEFAULT_BRIGHTNESS);
    let mut display = SDA5708::with_config(
        pins.d3.into_output(),
        pins.d4.into_output(),
        pins.d5.into_output(),
        pins.d6.into_output(),
        arduino_hal::Delay::new(),
        config,
    );
    display.init().unwrap();
    display.set_custom_character(SMILE, SMILE_GLYPH).unwrap();

    ufmt::uwriteln!(&mut serial, "Ramping brightness...").unwrap_infallible();
    for digit in 0..8 {
        display.write_char(digit, SMILE).unwrap();
    }
    for brightness in 0..=sda5708::MAX_BRIGHTNESS {
        display.set_brightness(brightness).unwrap();
        arduino_hal::delay_ms(300);
    }
    display.set_brightness(DEFAULT_BRIGHTNESS).unwrap();
    display.clear_screen().unwrap();

    ufmt::uwriteln!(&mut serial, "Scrolling ASCII chars...").unwrap_infallible();
    let mut msg = [b' '; 8];
    for offset in 0..=(26 + 8 * 2) {
        for (i, m) in msg.iter_mut().enumerate() {
            let idx = offset as i8 + i as i8 - 8;
            *m = if (0..26).contains(&idx) {
                b'A' + idx as u8
            } else {
                b' '
            };
        }
        display.buffer_mut().print_bytes_at(0, &msg);
        display.render().unwrap();
        arduino_hal::delay_ms(200);
    }

    ufmt::uwriteln!(&mut serial, "Counting up...").unwrap_infallible();
    let mut i: u32 = 0;
    loop {
        // regenerate the text every 3rd tick, refresh every tick
        display
            .update(|d| {
                d.print_fmt(format_args!("{:>7}", i));
                d.buffer_mut().print_bytes_at(7, &[SMILE]);
                d.pause_automatic_redraw(3);
            })
            .unwrap();
        i += 1;

        arduino_hal::delay_ms(100);
    }
}
