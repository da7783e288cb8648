//! HTML form front end: one page, one form, the label rendered as text.

use crate::features::{synthesize_timestamp, RawRecord, TIMESTAMP_FIELD};
use maud::{html, Markup, DOCTYPE};
use serde::Deserialize;
use serde_json::Value;

/// Url-encoded form body. Every field is optional text; blanks are left out
/// of the record so the encoder fills them.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    pub daily_time_spent_on_site: Option<String>,
    pub age: Option<String>,
    pub area_income: Option<String>,
    pub daily_internet_usage: Option<String>,
    pub ad_topic_line: Option<String>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl PredictForm {
    pub fn into_record(self) -> RawRecord {
        let mut record = RawRecord::new();
        let fields = [
            ("Daily Time Spent on Site", self.daily_time_spent_on_site),
            ("Age", self.age),
            ("Area Income", self.area_income),
            ("Daily Internet Usage", self.daily_internet_usage),
            ("Ad Topic Line", self.ad_topic_line),
            ("City", self.city),
            ("Gender", self.gender),
            ("Country", self.country),
        ];
        for (name, value) in fields {
            if let Some(v) = non_blank(value) {
                record.insert(name.to_string(), Value::String(v));
            }
        }
        if let Some(date) = non_blank(self.date) {
            let ts = synthesize_timestamp(&date, self.time.as_deref());
            record.insert(TIMESTAMP_FIELD.to_string(), Value::String(ts));
        }
        record
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Numeric inputs: caption, form name, step
const NUMBER_INPUTS: [(&str, &str, &str); 4] = [
    ("Daily Time Spent on Site", "daily_time_spent_on_site", "any"),
    ("Age", "age", "1"),
    ("Area Income", "area_income", "any"),
    ("Daily Internet Usage", "daily_internet_usage", "any"),
];

const TEXT_INPUTS: [(&str, &str); 2] = [("Ad Topic Line", "ad_topic_line"), ("City", "city")];

fn prediction_form() -> Markup {
    html! {
        form method="post" action="/" {
            @for (caption, name, step) in NUMBER_INPUTS {
                label { (caption) " " input type="number" step=(step) name=(name); }
                br;
            }
            @for (caption, name) in TEXT_INPUTS {
                label { (caption) " " input type="text" name=(name); }
                br;
            }
            label {
                "Gender "
                select name="gender" {
                    option { "Male" }
                    option { "Female" }
                }
            }
            br;
            label { "Country " input type="text" name="country"; }
            br;
            label { "Date " input type="date" name="date"; }
            label { "Time " input type="time" step="1" name="time"; }
            br;
            button type="submit" { "Predict" }
        }
    }
}

/// Full page; `outcome` is plain text shown under the form and is escaped on render.
pub fn render_page(outcome: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Ad click prediction" }
            }
            body {
                h1 { "Ad click prediction" }
                (prediction_form())
                @if let Some(text) = outcome {
                    p id="outcome" { (text) }
                }
            }
        }
    }
}
