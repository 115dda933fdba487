//! Calendar time and strftime-style formatting for the print helpers.

use core::fmt::{self, Write};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Wall-clock time as supplied by the caller's clock source.
///
/// `month` is 1-12 and `day` is 1-31. No calendar validation is done
/// beyond what formatting needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Time {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Day of the week, 0 = Sunday. `None` if `month` is out of range.
    pub fn weekday(&self) -> Option<u8> {
        const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let month = self.month.checked_sub(1).filter(|m| *m < 12)? as usize;
        let mut year = self.year as i32;
        if month < 2 {
            year -= 1;
        }
        let day = year + year / 4 - year / 100 + year / 400 + OFFSETS[month] + self.day as i32;
        Some(day.rem_euclid(7) as u8)
    }

    /// Write `self` to `out` following `format`.
    ///
    /// Supported: `%H %I %M %S %p %d %e %m %y %Y %a %b %%`. Any other
    /// specifier, a trailing `%`, or an out-of-range month for `%a`/`%b`
    /// yields `fmt::Error`.
    pub fn format<W: Write>(&self, out: &mut W, format: &str) -> fmt::Result {
        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.write_char(c)?;
                continue;
            }
            match chars.next().ok_or(fmt::Error)? {
                'H' => write!(out, "{:02}", self.hour)?,
                'I' => write!(out, "{:02}", self.hour_12())?,
                'M' => write!(out, "{:02}", self.minute)?,
                'S' => write!(out, "{:02}", self.second)?,
                'p' => out.write_str(if self.hour < 12 { "AM" } else { "PM" })?,
                'd' => write!(out, "{:02}", self.day)?,
                'e' => write!(out, "{:>2}", self.day)?,
                'm' => write!(out, "{:02}", self.month)?,
                'y' => write!(out, "{:02}", self.year % 100)?,
                'Y' => write!(out, "{}", self.year)?,
                'a' => out.write_str(WEEKDAYS[self.weekday().ok_or(fmt::Error)? as usize])?,
                'b' => out.write_str(self.month_name().ok_or(fmt::Error)?)?,
                '%' => out.write_char('%')?,
                _ => return Err(fmt::Error),
            }
        }
        Ok(())
    }

    fn hour_12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    fn month_name(&self) -> Option<&'static str> {
        MONTHS.get(self.month.checked_sub(1)? as usize).copied()
    }
}
