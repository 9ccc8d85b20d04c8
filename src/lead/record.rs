use serde::Serialize;

use crate::lead::submission::FormSubmission;
use crate::utils::constants::{
    LEAD_SOURCE_ID, ORIGIN_ATTRIBUTE_LIST_ID, ORIGIN_ATTRIBUTE_VALUE, SALUTATION_ID,
    SECONDARY_ATTRIBUTE_LIST_ID,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomAttribute {
    pub list_id: u32,
    pub value: Option<String>,
}

/// Payload of the CRM lead creation call.
///
/// Only `name`, `company`, `phones` and `number_of_employees` come from the
/// submission. Everything else is fixed, `None` fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRecord {
    pub account_industry_list_id: Option<u32>,
    pub city: Option<String>,
    pub company: Option<String>,
    pub country: Option<String>,
    pub custom_attributes: Vec<CustomAttribute>,
    pub description: Option<String>,
    pub district: Option<String>,
    pub email: Option<String>,
    pub group_id: Vec<u32>,
    pub latitude: Option<f64>,
    pub lead_source_id: u32,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub number_of_employees: Option<String>,
    pub phones: Vec<String>,
    pub product_services: Vec<u32>,
    pub province: Option<String>,
    pub reseller_id: Option<u32>,
    pub salutation_id: u32,
    pub street: Option<String>,
    pub street_detail: Option<String>,
    pub sub_district: Option<String>,
    pub title: Option<String>,
    pub website: Option<String>,
    pub zip_code: Option<String>,
}

impl From<&FormSubmission> for LeadRecord {
    fn from(submission: &FormSubmission) -> Self {
        Self {
            account_industry_list_id: None,
            city: None,
            company: submission.organization.clone().filter(|c| !c.is_empty()),
            country: None,
            custom_attributes: vec![
                CustomAttribute {
                    list_id: ORIGIN_ATTRIBUTE_LIST_ID,
                    value: Some(ORIGIN_ATTRIBUTE_VALUE.to_owned()),
                },
                CustomAttribute {
                    list_id: SECONDARY_ATTRIBUTE_LIST_ID,
                    value: None,
                },
            ],
            description: None,
            district: None,
            email: None,
            group_id: Vec::new(),
            latitude: None,
            lead_source_id: LEAD_SOURCE_ID,
            longitude: None,
            name: submission.full_name.clone(),
            number_of_employees: submission.planned_users.clone(),
            phones: international_phones(submission.phone.as_deref()),
            product_services: Vec::new(),
            province: None,
            reseller_id: None,
            salutation_id: SALUTATION_ID,
            street: None,
            street_detail: None,
            sub_district: None,
            title: None,
            website: None,
            zip_code: None,
        }
    }
}

// no format check: the form collects digits with country code and no plus sign
fn international_phones(phone: Option<&str>) -> Vec<String> {
    match phone {
        Some(number) if !number.is_empty() => vec![format!("+{}", number)],
        _ => Vec::new(),
    }
}
