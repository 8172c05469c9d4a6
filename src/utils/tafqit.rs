//! Tafqit: writing an amount out in Arabic words for payment vouchers
//! and receipts.

const UNITS: [&str; 10] = [
    "", "واحد", "اثنان", "ثلاثة", "أربعة", "خمسة", "ستة", "سبعة", "ثمانية", "تسعة",
];
const TEENS: [&str; 10] = [
    "عشرة",
    "أحد عشر",
    "اثنا عشر",
    "ثلاثة عشر",
    "أربعة عشر",
    "خمسة عشر",
    "ستة عشر",
    "سبعة عشر",
    "ثمانية عشر",
    "تسعة عشر",
];
const TENS: [&str; 10] = [
    "", "", "عشرون", "ثلاثون", "أربعون", "خمسون", "ستون", "سبعون", "ثمانون", "تسعون",
];
const HUNDREDS: [&str; 10] = [
    "", "مائة", "مائتان", "ثلاثمائة", "أربعمائة", "خمسمائة", "ستمائة", "سبعمائة", "ثمانمائة",
    "تسعمائة",
];

pub const CURRENCY_SUFFIX: &str = "ريال قطري لا غير";

/// Largest amount that can be written out.
pub const MAX_AMOUNT: u64 = 999_999_999;

// 0..=999
fn convert_group(num: u64) -> String {
    let mut res = String::new();
    let h = (num / 100) as usize;
    let remainder = num % 100;
    let t = (remainder / 10) as usize;
    let u = (remainder % 10) as usize;

    if h > 0 {
        res.push_str(HUNDREDS[h]);
        if remainder > 0 {
            res.push_str(" و");
        }
    }
    if remainder > 0 {
        if remainder < 10 {
            res.push_str(UNITS[remainder as usize]);
        } else if remainder < 20 {
            res.push_str(TEENS[remainder as usize - 10]);
        } else {
            res.push_str(UNITS[u]);
            if u > 0 && t > 0 {
                res.push_str(" و");
            }
            res.push_str(TENS[t]);
        }
    }
    res
}

/// Arabic words for `n`, without currency. Zero yields an empty string,
/// `None` above [`MAX_AMOUNT`].
pub fn to_arabic_words(n: u64) -> Option<String> {
    if n > MAX_AMOUNT {
        return None;
    }

    let mut words = String::new();
    let millions = n / 1_000_000;
    let mut remainder = n % 1_000_000;
    if millions > 0 {
        words.push_str(&convert_group(millions));
        words.push_str(" مليون");
        if remainder > 0 {
            words.push_str(" و");
        }
    }

    let thousands = remainder / 1000;
    remainder %= 1000;
    if thousands > 0 {
        match thousands {
            1 => words.push_str("ألف"),
            2 => words.push_str("ألفان"),
            3..=10 => {
                words.push_str(&convert_group(thousands));
                words.push_str(" آلاف");
            }
            _ => {
                words.push_str(&convert_group(thousands));
                words.push_str(" ألف");
            }
        }
        if remainder > 0 {
            words.push_str(" و");
        }
    }

    if remainder > 0 {
        words.push_str(&convert_group(remainder));
    }
    Some(words)
}

/// Voucher wording: the amount in words followed by the currency phrase.
/// Zero stays empty so a blank amount prints a blank line.
pub fn amount_in_words(n: u64) -> Option<String> {
    let words = to_arabic_words(n)?;
    if words.is_empty() {
        return Some(words);
    }
    Some(format!("{} {}", words, CURRENCY_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers() {
        assert_eq!(to_arabic_words(7).unwrap(), "سبعة");
        assert_eq!(to_arabic_words(12).unwrap(), "اثنا عشر");
        assert_eq!(to_arabic_words(21).unwrap(), "واحد وعشرون");
        assert_eq!(to_arabic_words(40).unwrap(), "أربعون");
    }

    #[test]
    fn hundreds_and_thousands() {
        assert_eq!(to_arabic_words(305).unwrap(), "ثلاثمائة وخمسة");
        assert_eq!(to_arabic_words(2000).unwrap(), "ألفان");
        assert_eq!(to_arabic_words(5000).unwrap(), "خمسة آلاف");
        assert_eq!(to_arabic_words(15_000).unwrap(), "خمسة عشر ألف");
    }

    #[test]
    fn voucher_amount_carries_currency() {
        assert_eq!(
            amount_in_words(1250).unwrap(),
            "ألف ومائتان وخمسون ريال قطري لا غير"
        );
        assert_eq!(
            amount_in_words(2_000_001).unwrap(),
            "اثنان مليون وواحد ريال قطري لا غير"
        );
    }

    #[test]
    fn zero_is_blank_and_overflow_is_rejected() {
        assert_eq!(amount_in_words(0).unwrap(), "");
        assert_eq!(to_arabic_words(MAX_AMOUNT + 1), None);
        assert!(to_arabic_words(MAX_AMOUNT).is_some());
    }
}
