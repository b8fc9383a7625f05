//! # Locale-aware formatting
//!
//! Rendering of products, reviews, and currency totals for a fixed set of
//! supported locales. Everything locale-specific lives in a static
//! [`Bundle`] per tag: phrase templates, the short-date pattern, and the
//! currency spec. The [`Formatter`] resolves its bundle once at construction
//! and applies it mechanically after that, so identical logical inputs always
//! render identically for a given locale.
//!
//! Unsupported tags never fail: [`LocaleTag::parse_or_default`] falls back to
//! `en-GB` deterministically.

use crate::model::product::today;
use crate::model::{Product, Review};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The supported locale tags. `EnGb` is the designated fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocaleTag {
    EnGb,
    EnUs,
    FrFr,
    RuRu,
    ZhCn,
}

impl LocaleTag {
    pub const ALL: [LocaleTag; 5] = [
        LocaleTag::EnGb,
        LocaleTag::EnUs,
        LocaleTag::FrFr,
        LocaleTag::RuRu,
        LocaleTag::ZhCn,
    ];

    pub const DEFAULT: LocaleTag = LocaleTag::EnGb;

    /// BCP 47 language tag for this locale.
    pub fn as_str(self) -> &'static str {
        match self {
            LocaleTag::EnGb => "en-GB",
            LocaleTag::EnUs => "en-US",
            LocaleTag::FrFr => "fr-FR",
            LocaleTag::RuRu => "ru-RU",
            LocaleTag::ZhCn => "zh-CN",
        }
    }

    /// Parses a language tag into a supported locale, if it is one.
    pub fn parse(tag: &str) -> Option<LocaleTag> {
        LocaleTag::ALL.into_iter().find(|l| l.as_str() == tag)
    }

    /// Parses a language tag, falling back to [`LocaleTag::DEFAULT`] when the
    /// tag is not supported.
    pub fn parse_or_default(tag: &str) -> LocaleTag {
        LocaleTag::parse(tag).unwrap_or(LocaleTag::DEFAULT)
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a locale writes a currency amount.
struct CurrencySpec {
    symbol: &'static str,
    /// Symbol before the number (`£1.99`) or after it (`1,99 €`).
    symbol_first: bool,
    decimal_sep: char,
    group_sep: &'static str,
}

/// The per-locale data table: phrase templates, date pattern, currency spec.
/// Templates use `{name}`, `{price}`, `{rating}`, `{date}`, `{comments}`
/// placeholders.
struct Bundle {
    product: &'static str,
    review: &'static str,
    no_reviews: &'static str,
    date_format: &'static str,
    currency: CurrencySpec,
}

static EN_GB: Bundle = Bundle {
    product: "Product: {name}, Price: {price}, Rating: {rating}, Best before: {date}",
    review: "Review: {rating}, {comments}",
    no_reviews: "Not reviewed",
    date_format: "%d/%m/%Y",
    currency: CurrencySpec {
        symbol: "\u{a3}",
        symbol_first: true,
        decimal_sep: '.',
        group_sep: ",",
    },
};

static EN_US: Bundle = Bundle {
    product: "Product: {name}, Price: {price}, Rating: {rating}, Best before: {date}",
    review: "Review: {rating}, {comments}",
    no_reviews: "Not reviewed",
    date_format: "%m/%d/%Y",
    currency: CurrencySpec {
        symbol: "$",
        symbol_first: true,
        decimal_sep: '.',
        group_sep: ",",
    },
};

static FR_FR: Bundle = Bundle {
    product: "Produit : {name}, Prix : {price}, \u{c9}valuation : {rating}, \u{c0} consommer avant : {date}",
    review: "Avis : {rating}, {comments}",
    no_reviews: "Aucun avis",
    date_format: "%d/%m/%Y",
    currency: CurrencySpec {
        symbol: " \u{20ac}",
        symbol_first: false,
        decimal_sep: ',',
        group_sep: "\u{a0}",
    },
};

static RU_RU: Bundle = Bundle {
    product: "\u{422}\u{43e}\u{432}\u{430}\u{440}: {name}, \u{426}\u{435}\u{43d}\u{430}: {price}, \u{420}\u{435}\u{439}\u{442}\u{438}\u{43d}\u{433}: {rating}, \u{413}\u{43e}\u{434}\u{435}\u{43d} \u{434}\u{43e}: {date}",
    review: "\u{41e}\u{442}\u{437}\u{44b}\u{432}: {rating}, {comments}",
    no_reviews: "\u{41d}\u{435}\u{442} \u{43e}\u{442}\u{437}\u{44b}\u{432}\u{43e}\u{432}",
    date_format: "%d.%m.%Y",
    currency: CurrencySpec {
        symbol: " \u{20bd}",
        symbol_first: false,
        decimal_sep: ',',
        group_sep: "\u{a0}",
    },
};

static ZH_CN: Bundle = Bundle {
    product: "\u{5546}\u{54c1}\u{ff1a}{name}\u{ff0c}\u{4ef7}\u{683c}\u{ff1a}{price}\u{ff0c}\u{8bc4}\u{5206}\u{ff1a}{rating}\u{ff0c}\u{4fdd}\u{8d28}\u{671f}\u{81f3}\u{ff1a}{date}",
    review: "\u{8bc4}\u{8bba}\u{ff1a}{rating}\u{ff0c}{comments}",
    no_reviews: "\u{6682}\u{65e0}\u{8bc4}\u{8bba}",
    date_format: "%Y/%m/%d",
    currency: CurrencySpec {
        symbol: "\u{a5}",
        symbol_first: true,
        decimal_sep: '.',
        group_sep: ",",
    },
};

/// Renders products, reviews, and money for one locale.
pub struct Formatter {
    tag: LocaleTag,
    bundle: &'static Bundle,
}

impl Formatter {
    pub fn new(tag: LocaleTag) -> Self {
        let bundle = match tag {
            LocaleTag::EnGb => &EN_GB,
            LocaleTag::EnUs => &EN_US,
            LocaleTag::FrFr => &FR_FR,
            LocaleTag::RuRu => &RU_RU,
            LocaleTag::ZhCn => &ZH_CN,
        };
        Self { tag, bundle }
    }

    /// Formatter for a raw language tag, falling back to the default locale
    /// when the tag is unsupported.
    pub fn for_tag(tag: &str) -> Self {
        Self::new(LocaleTag::parse_or_default(tag))
    }

    pub fn locale(&self) -> LocaleTag {
        self.tag
    }

    /// One-line rendering of a product: name, localized price, star glyphs,
    /// localized short best-before date.
    pub fn format_product(&self, product: &Product) -> String {
        self.bundle
            .product
            .replace("{name}", product.name())
            .replace("{price}", &self.format_money(product.price()))
            .replace("{rating}", product.stars())
            .replace("{date}", &self.format_date(product.best_before_on(today())))
    }

    /// One-line rendering of a review: star glyphs plus the comment.
    pub fn format_review(&self, review: &Review) -> String {
        self.bundle
            .review
            .replace("{rating}", review.rating().stars())
            .replace("{comments}", review.comments())
    }

    /// Localized "no reviews" literal for empty report bodies.
    pub fn no_reviews(&self) -> &'static str {
        self.bundle.no_reviews
    }

    /// Formats an amount as locale currency: two decimals (half-up), grouped
    /// thousands, locale separators and symbol placement.
    pub fn format_money(&self, amount: Decimal) -> String {
        let currency = &self.bundle.currency;
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative();
        rounded.rescale(2);
        let digits = rounded.abs().to_string();
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::new();
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push_str(currency.group_sep);
            }
            grouped.push(c);
        }

        let sign = if negative { "-" } else { "" };
        let number = format!("{grouped}{}{cents}", currency.decimal_sep);
        if currency.symbol_first {
            format!("{sign}{}{number}", currency.symbol)
        } else {
            format!("{sign}{number}{}", currency.symbol)
        }
    }

    fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.bundle.date_format).to_string()
    }
}
