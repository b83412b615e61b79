//! Record and filter data structures shared by the services and the UI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A Matter record as stored by the record service.
///
/// Field names on the wire follow the record schema, so serializing a
/// `Matter` yields the same JSON the service handed out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Matter {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Matter_Number__c", default, skip_serializing_if = "Option::is_none")]
    pub matter_number: Option<String>,
    #[serde(rename = "Type__c", default, skip_serializing_if = "Option::is_none")]
    pub matter_type: Option<String>,
    #[serde(rename = "Subtype__c", default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(rename = "Statute__c", default, skip_serializing_if = "Option::is_none")]
    pub statute: Option<String>,
    #[serde(rename = "Stage__c", default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(rename = "Status__c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "Decision_Date__c", default, skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<NaiveDate>,
}

impl Matter {
    /// Value of the record field backing a categorical filter.
    pub fn field_value(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Type => self.matter_type.as_deref(),
            FilterField::Subtype => self.subtype.as_deref(),
            FilterField::Statute => self.statute.as_deref(),
            FilterField::Stage => self.stage.as_deref(),
        }
    }
}

/// Categorical (multi-select) filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterField {
    Type,
    Subtype,
    Statute,
    Stage,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Type,
        FilterField::Subtype,
        FilterField::Statute,
        FilterField::Stage,
    ];

    /// Record field name the catalog is keyed by.
    pub fn api_name(self) -> &'static str {
        match self {
            FilterField::Type => "Type__c",
            FilterField::Subtype => "Subtype__c",
            FilterField::Statute => "Statute__c",
            FilterField::Stage => "Stage__c",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Type => "Type",
            FilterField::Subtype => "Subtype",
            FilterField::Statute => "Statute",
            FilterField::Stage => "Stage",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One selectable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistValue {
    pub label: String,
    pub value: String,
}

impl PicklistValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Inclusive decision date bounds. A missing bound is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "beginningDecisionDate", default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<NaiveDate>,
    #[serde(rename = "endingDecisionDate", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.begin.is_none() && self.end.is_none()
    }

    /// Whether `date` satisfies the range. Undated records only pass an
    /// unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.begin.map_or(true, |begin| date >= begin) && self.end.map_or(true, |end| date <= end)
    }
}

/// The filter criteria published on the bus.
///
/// `None` for a categorical set means "no constraint"; an empty set matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statutes: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<BTreeSet<String>>,
    #[serde(flatten)]
    pub decision_date: DateRange,
}

impl FilterState {
    pub fn with_search_key(search_key: impl Into<String>) -> Self {
        Self {
            search_key: search_key.into(),
            ..Self::default()
        }
    }

    pub fn set(&self, field: FilterField) -> Option<&BTreeSet<String>> {
        match field {
            FilterField::Type => self.types.as_ref(),
            FilterField::Subtype => self.subtypes.as_ref(),
            FilterField::Statute => self.statutes.as_ref(),
            FilterField::Stage => self.stages.as_ref(),
        }
    }

    pub fn set_mut(&mut self, field: FilterField) -> &mut Option<BTreeSet<String>> {
        match field {
            FilterField::Type => &mut self.types,
            FilterField::Subtype => &mut self.subtypes,
            FilterField::Statute => &mut self.statutes,
            FilterField::Stage => &mut self.stages,
        }
    }

    /// Whether a matter satisfies every constraint in this filter set.
    pub fn matches(&self, matter: &Matter) -> bool {
        let key = self.search_key.trim().to_lowercase();
        if !key.is_empty() {
            let in_name = matter.name.to_lowercase().contains(&key);
            let in_number = matter
                .matter_number
                .as_deref()
                .is_some_and(|number| number.to_lowercase().contains(&key));
            if !in_name && !in_number {
                return false;
            }
        }

        let sets_match = FilterField::ALL.iter().all(|field| match self.set(*field) {
            None => true,
            Some(allowed) => matter
                .field_value(*field)
                .is_some_and(|value| allowed.contains(value)),
        });

        sets_match && self.decision_date.contains(matter.decision_date)
    }
}

/// A request for one page of matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub filters: FilterState,
    pub page_number: u32,
}

/// One page of matters plus the totals needed for paging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub items: Vec<Matter>,
    pub total_item_count: u64,
    pub page_size: u32,
    pub page_number: u32,
}

impl PageResult {
    /// Number of pages needed to show every matching matter (at least one).
    pub fn page_count(&self) -> u32 {
        page_count(self.total_item_count, self.page_size)
    }
}

/// Number of pages for `total` items at `page_size` per page, never zero.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
