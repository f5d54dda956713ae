// ABOUTME: English spell-out of numbers for the num:spellout style
// ABOUTME: Covers integers up to the quintillions and reads fractions digit by digit

use super::numbers::Digits;
use crate::template::value::Number;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

pub(super) fn spell_out(number: Number) -> Option<String> {
    let (negative, integer, fraction) = match number {
        Number::Int(value) => (value < 0, value.unsigned_abs(), String::new()),
        Number::Float(value) if value.is_finite() && value.abs() < 1e19 => {
            let digits = Digits::fixed(number, 0, 6)?;
            (digits.negative, digits.integer.parse::<u64>().ok()?, digits.fraction)
        }
        Number::Float(_) => return None,
    };

    let mut words = spell_integer(integer);
    if !fraction.is_empty() {
        words.push_str(" point");
        for digit in fraction.chars() {
            words.push(' ');
            words.push_str(ONES[digit.to_digit(10)? as usize]);
        }
    }
    if negative {
        words.insert_str(0, "minus ");
    }
    Some(words)
}

fn spell_integer(value: u64) -> String {
    if value < 20 {
        return ONES[value as usize].to_string();
    }
    if value < 100 {
        let tens = TENS[(value / 10) as usize];
        return match value % 10 {
            0 => tens.to_string(),
            ones => format!("{}-{}", tens, ONES[ones as usize]),
        };
    }
    if value < 1000 {
        let hundreds = format!("{} hundred", ONES[(value / 100) as usize]);
        return match value % 100 {
            0 => hundreds,
            rest => format!("{} {}", hundreds, spell_integer(rest)),
        };
    }

    for (scale, name) in SCALES {
        if value >= scale {
            let head = format!("{} {}", spell_integer(value / scale), name);
            return match value % scale {
                0 => head,
                rest => format!("{} {}", head, spell_integer(rest)),
            };
        }
    }
    unreachable!("values of 1000 and above match a scale")
}
