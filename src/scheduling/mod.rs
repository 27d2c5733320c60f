//! Procurement scheduling rules.
//!
//! Every derived date on requisitions, tenders and contracts is a pure
//! function of the record's anchor fields. Services run these appliers on
//! every create and update; running them again on unchanged anchors is a
//! no-op, so there is nothing to coordinate across entities.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Weekday};

use crate::entities::contract::{self, DurationMeasure};
use crate::entities::requisition::{self, ProcurementCategory};
use crate::entities::tender::{self, Eligibility};

/// Fallback when no configuration is loaded.
pub const DEFAULT_REQUISITION_DEADLINE_DAYS: u32 = 7;

/// Evaluation duration defaults by the linked requisition's category.
const EVALUATION_DAYS_QUOTATION: i32 = 21;
const EVALUATION_DAYS_TENDER: i32 = 30;

/// Minutes between tender closing and the public opening.
const OPENING_DELAY_MINUTES: i64 = 30;

/// Day offsets from the creation date to the proposed advert date, indexed
/// Monday..Sunday. Wednesday/Thursday starts land on the immediately
/// following Wednesday; every other weekday skips it for a longer lead time.
/// The table is authoritative; do not "straighten" the asymmetry.
const ADVERT_OFFSET_DAYS: [i64; 7] = [9, 8, 7, 6, 12, 11, 10];

/// `date_assigned + deadline_days`. Total: callers pass `None` through.
pub fn creation_deadline(date_assigned: Option<NaiveDate>, deadline_days: u32) -> Option<NaiveDate> {
    date_assigned.map(|d| d + Duration::days(i64::from(deadline_days)))
}

/// Proposed advert date for a tender created on `anchor`: always a Wednesday
/// strictly after the anchor, per the offset table above.
pub fn proposed_advert_date(anchor: NaiveDate) -> NaiveDate {
    let offset = ADVERT_OFFSET_DAYS[anchor.weekday().num_days_from_monday() as usize];
    anchor + Duration::days(offset)
}

/// Opening time is the closing time plus a fixed delay, as wall-clock
/// arithmetic: a 23:45 closing opens at 00:15 without moving the opening
/// date. That behavior is load-bearing for downstream reports.
pub fn opening_time_after(closing: NaiveTime) -> NaiveTime {
    closing + Duration::minutes(OPENING_DELAY_MINUTES)
}

/// Day addition clamped at the calendar's end instead of panicking on
/// out-of-range inputs.
fn add_days_clamped(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Calendar month addition preserving the day-of-month, clamped to the end
/// of the target month (Jan 31 + 1 month = Feb 28/29).
pub fn add_calendar_months(date: NaiveDate, months: u32) -> NaiveDate {
    // chrono's Months addition clamps exactly this way and only fails out
    // past year 262143, which no procurement plan reaches.
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Contract expiry from its commencement anchor and duration.
pub fn contract_expiry(
    commencement: NaiveDate,
    duration: i32,
    measure: DurationMeasure,
) -> NaiveDate {
    let duration = duration.max(0) as u32;
    match measure {
        DurationMeasure::Days => add_days_clamped(commencement, i64::from(duration)),
        DurationMeasure::Months => add_calendar_months(commencement, duration),
        DurationMeasure::Years => add_calendar_months(commencement, duration.saturating_mul(12)),
    }
}

/// Applies the requisition rule in place.
pub fn apply_requisition_schedule(requisition: &mut requisition::Model, deadline_days: u32) {
    requisition.creation_deadline = creation_deadline(requisition.date_assigned, deadline_days);
}

/// Applies the tender cascade in place, in its fixed order.
///
/// `requisition_category` is the category of the linked requisition when one
/// exists; it only matters for the evaluation-duration default. `today`
/// seeds `tender_creation_date` when the record arrives without one.
pub fn apply_tender_schedule(
    tender: &mut tender::Model,
    requisition_category: Option<ProcurementCategory>,
    today: NaiveDate,
) {
    // 1. Creation date defaults to the day the record is first saved.
    let creation_date = *tender.tender_creation_date.get_or_insert(today);

    // 2. Eligibility and AGPO category must stay consistent.
    if tender.eligibility != Eligibility::Agpo {
        tender.agpo_category = None;
    }

    // 3. The proposed advert date is only kept when it already sits on a
    //    Wednesday; anything else is recomputed from the creation date.
    let advert_stands = tender
        .proposed_advert_date
        .is_some_and(|d| d.weekday() == Weekday::Wed);
    if !advert_stands {
        tender.proposed_advert_date = Some(proposed_advert_date(creation_date));
    }

    // 4. Opening happens the day the tender closes.
    if let Some(closing) = tender.tender_closing_date {
        tender.tender_opening_date = Some(closing);
    }

    // 5. ...half an hour after the closing time.
    if tender.tender_closing_date.is_some() {
        if let Some(closing_time) = tender.tender_closing_time {
            tender.tender_opening_time = Some(opening_time_after(closing_time));
        }
    }

    // 6. Validity runs from the opening date, falling back to the closing
    //    date when no opening is recorded.
    let validity_base = tender.tender_opening_date.or(tender.tender_closing_date);
    if let (Some(base), Some(days)) = (validity_base, tender.tender_validity_days) {
        tender.tender_validity_expiry_date = Some(add_days_clamped(base, i64::from(days)));
    }

    // 8 (default) folded ahead of 7's recompute: an unset evaluation
    // duration takes the category default when a requisition is linked.
    if tender.tender_evaluation_duration_days.is_none() {
        if let Some(category) = requisition_category {
            tender.tender_evaluation_duration_days = Some(match category {
                ProcurementCategory::Quotation => EVALUATION_DAYS_QUOTATION,
                ProcurementCategory::Tender => EVALUATION_DAYS_TENDER,
            });
        }
    }

    // 7. Evaluation window runs from the opening date.
    if let (Some(opening), Some(days)) = (
        tender.tender_opening_date,
        tender.tender_evaluation_duration_days,
    ) {
        tender.tender_evaluation_end_date = Some(add_days_clamped(opening, i64::from(days)));
    }
}

/// Applies the contract cascade in place. A missing commencement date leaves
/// every derived expiry untouched.
pub fn apply_contract_schedule(contract: &mut contract::Model) {
    let Some(commencement) = contract.commencement_date else {
        return;
    };

    if let (Some(duration), Some(measure)) =
        (contract.contract_duration, contract.contract_duration_measure)
    {
        contract.contract_expiry_date = Some(contract_expiry(commencement, duration, measure));
    }

    if let Some(days) = contract.tender_security_validity_days {
        contract.tender_security_expiry_date =
            Some(add_days_clamped(commencement, i64::from(days)));
    }

    if let Some(days) = contract.performance_security_duration_days {
        contract.performance_security_expiry_date =
            Some(add_days_clamped(commencement, i64::from(days)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::tender::AgpoCategory;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn blank_tender() -> tender::Model {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        tender::Model {
            id: 1,
            tender_number: "TT-2025-001".into(),
            requisition_id: None,
            description: "Supply of transformer oil".into(),
            procurement_type_id: None,
            eligibility: Eligibility::Open,
            agpo_category: None,
            created_by_employee_id: None,
            egp_reference: None,
            internal_reference: None,
            tender_creation_date: None,
            proposed_advert_date: None,
            tender_advert_date: None,
            tender_closing_date: None,
            tender_closing_time: None,
            tender_opening_date: None,
            tender_opening_time: None,
            tender_validity_days: None,
            tender_validity_expiry_date: None,
            tender_evaluation_duration_days: None,
            tender_evaluation_end_date: None,
            estimated_value: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn blank_contract() -> contract::Model {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        contract::Model {
            id: 1,
            tender_id: 1,
            contract_reference: None,
            created_by_employee_id: None,
            loa_status_id: None,
            contract_status_id: None,
            supplier_name: None,
            supplier_county: None,
            e_purchase_order_no: None,
            sap_purchase_order_no: None,
            contract_signature_date: None,
            commencement_date: None,
            contract_duration: None,
            contract_duration_measure: None,
            contract_expiry_date: None,
            contract_delivery_period: None,
            contract_delivery_period_measure: None,
            contract_value: None,
            tender_security_value: None,
            tender_security_validity_days: None,
            tender_security_expiry_date: None,
            performance_security_amount: None,
            performance_security_duration_days: None,
            performance_security_expiry_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn creation_deadline_adds_configured_days() {
        assert_eq!(
            creation_deadline(Some(date(2025, 3, 3)), 7),
            Some(date(2025, 3, 10))
        );
        assert_eq!(creation_deadline(None, 7), None);
    }

    // 2025-01-06 is a Monday; each case walks one day forward through the
    // week and pins the full offset table.
    #[rstest]
    #[case(date(2025, 1, 6), date(2025, 1, 15))] // Mon +9
    #[case(date(2025, 1, 7), date(2025, 1, 15))] // Tue +8
    #[case(date(2025, 1, 8), date(2025, 1, 15))] // Wed +7
    #[case(date(2025, 1, 9), date(2025, 1, 15))] // Thu +6
    #[case(date(2025, 1, 10), date(2025, 1, 22))] // Fri +12
    #[case(date(2025, 1, 11), date(2025, 1, 22))] // Sat +11
    #[case(date(2025, 1, 12), date(2025, 1, 22))] // Sun +10
    fn advert_date_matches_offset_table(#[case] anchor: NaiveDate, #[case] expected: NaiveDate) {
        let advert = proposed_advert_date(anchor);
        assert_eq!(advert, expected);
        assert_eq!(advert.weekday(), Weekday::Wed);
        assert!(advert > anchor);
    }

    #[test]
    fn advert_date_kept_when_already_wednesday() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 1, 6));
        t.proposed_advert_date = Some(date(2025, 3, 5)); // a Wednesday
        apply_tender_schedule(&mut t, None, date(2025, 1, 6));
        assert_eq!(t.proposed_advert_date, Some(date(2025, 3, 5)));
    }

    #[test]
    fn advert_date_recomputed_when_off_wednesday() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 1, 6));
        t.proposed_advert_date = Some(date(2025, 3, 6)); // a Thursday
        apply_tender_schedule(&mut t, None, date(2025, 1, 6));
        assert_eq!(t.proposed_advert_date, Some(date(2025, 1, 15)));
    }

    #[test]
    fn creation_date_defaults_to_today() {
        let mut t = blank_tender();
        apply_tender_schedule(&mut t, None, date(2025, 2, 14));
        assert_eq!(t.tender_creation_date, Some(date(2025, 2, 14)));
    }

    #[test]
    fn non_agpo_eligibility_clears_category() {
        let mut t = blank_tender();
        t.eligibility = Eligibility::Open;
        t.agpo_category = Some(AgpoCategory::Youth);
        apply_tender_schedule(&mut t, None, date(2025, 1, 6));
        assert_eq!(t.agpo_category, None);
    }

    #[test]
    fn agpo_eligibility_keeps_category() {
        let mut t = blank_tender();
        t.eligibility = Eligibility::Agpo;
        t.agpo_category = Some(AgpoCategory::Women);
        apply_tender_schedule(&mut t, None, date(2025, 1, 6));
        assert_eq!(t.agpo_category, Some(AgpoCategory::Women));
    }

    #[test]
    fn closing_derives_opening_and_validity() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 2, 3));
        t.tender_closing_date = Some(date(2025, 3, 10));
        t.tender_closing_time = Some(time(9, 30));
        t.tender_validity_days = Some(30);
        apply_tender_schedule(&mut t, None, date(2025, 2, 3));

        assert_eq!(t.tender_opening_date, Some(date(2025, 3, 10)));
        assert_eq!(t.tender_opening_time, Some(time(10, 0)));
        assert_eq!(t.tender_validity_expiry_date, Some(date(2025, 4, 9)));
    }

    #[test]
    fn opening_time_wraps_midnight_without_moving_date() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 2, 3));
        t.tender_closing_date = Some(date(2025, 3, 10));
        t.tender_closing_time = Some(time(23, 45));
        apply_tender_schedule(&mut t, None, date(2025, 2, 3));

        assert_eq!(t.tender_opening_time, Some(time(0, 15)));
        assert_eq!(t.tender_opening_date, Some(date(2025, 3, 10)));
    }

    #[test]
    fn evaluation_window_from_opening_date() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 2, 3));
        t.tender_closing_date = Some(date(2025, 3, 10));
        t.tender_evaluation_duration_days = Some(14);
        apply_tender_schedule(&mut t, None, date(2025, 2, 3));
        assert_eq!(t.tender_evaluation_end_date, Some(date(2025, 3, 24)));
    }

    #[rstest]
    #[case(ProcurementCategory::Quotation, 21, date(2025, 3, 31))]
    #[case(ProcurementCategory::Tender, 30, date(2025, 4, 9))]
    fn evaluation_duration_defaults_by_category(
        #[case] category: ProcurementCategory,
        #[case] expected_days: i32,
        #[case] expected_end: NaiveDate,
    ) {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 2, 3));
        t.tender_closing_date = Some(date(2025, 3, 10));
        apply_tender_schedule(&mut t, Some(category), date(2025, 2, 3));
        assert_eq!(t.tender_evaluation_duration_days, Some(expected_days));
        assert_eq!(t.tender_evaluation_end_date, Some(expected_end));
    }

    #[test]
    fn evaluation_duration_untouched_without_requisition() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 2, 3));
        apply_tender_schedule(&mut t, None, date(2025, 2, 3));
        assert_eq!(t.tender_evaluation_duration_days, None);
        assert_eq!(t.tender_evaluation_end_date, None);
    }

    #[test]
    fn tender_schedule_is_idempotent() {
        let mut t = blank_tender();
        t.tender_creation_date = Some(date(2025, 2, 3));
        t.tender_closing_date = Some(date(2025, 3, 10));
        t.tender_closing_time = Some(time(9, 30));
        t.tender_validity_days = Some(30);
        apply_tender_schedule(&mut t, Some(ProcurementCategory::Tender), date(2025, 2, 3));
        let first = t.clone();
        apply_tender_schedule(&mut t, Some(ProcurementCategory::Tender), date(2025, 6, 1));
        assert_eq!(t, first);
    }

    #[rstest]
    #[case(date(2025, 1, 31), 1, date(2025, 2, 28))] // clamp, non-leap
    #[case(date(2024, 1, 31), 1, date(2024, 2, 29))] // clamp, leap
    #[case(date(2025, 3, 15), 12, date(2026, 3, 15))]
    #[case(date(2025, 8, 31), 3, date(2025, 11, 30))]
    fn month_addition_clamps_to_month_end(
        #[case] start: NaiveDate,
        #[case] months: u32,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(add_calendar_months(start, months), expected);
    }

    #[test]
    fn contract_expiry_per_measure() {
        let start = date(2025, 1, 31);
        assert_eq!(
            contract_expiry(start, 45, DurationMeasure::Days),
            date(2025, 3, 17)
        );
        assert_eq!(
            contract_expiry(start, 1, DurationMeasure::Months),
            date(2025, 2, 28)
        );
        assert_eq!(
            contract_expiry(start, 2, DurationMeasure::Years),
            date(2027, 1, 31)
        );
    }

    #[test]
    fn contract_expiry_saturates_on_absurd_durations() {
        let start = date(2025, 1, 1);
        assert_eq!(
            contract_expiry(start, i32::MAX, DurationMeasure::Years),
            NaiveDate::MAX
        );
        assert_eq!(
            contract_expiry(start, i32::MAX, DurationMeasure::Months),
            NaiveDate::MAX
        );
        assert_eq!(
            contract_expiry(start, i32::MAX, DurationMeasure::Days),
            NaiveDate::MAX
        );
    }

    #[test]
    fn contract_schedule_derives_all_expiries() {
        let mut c = blank_contract();
        c.commencement_date = Some(date(2025, 1, 31));
        c.contract_duration = Some(1);
        c.contract_duration_measure = Some(DurationMeasure::Months);
        c.tender_security_validity_days = Some(120);
        c.performance_security_duration_days = Some(365);
        apply_contract_schedule(&mut c);

        assert_eq!(c.contract_expiry_date, Some(date(2025, 2, 28)));
        assert_eq!(c.tender_security_expiry_date, Some(date(2025, 5, 31)));
        assert_eq!(c.performance_security_expiry_date, Some(date(2026, 1, 31)));
    }

    #[test]
    fn contract_schedule_noop_without_commencement() {
        let mut c = blank_contract();
        c.contract_duration = Some(6);
        c.contract_duration_measure = Some(DurationMeasure::Months);
        c.tender_security_validity_days = Some(90);
        apply_contract_schedule(&mut c);
        assert_eq!(c.contract_expiry_date, None);
        assert_eq!(c.tender_security_expiry_date, None);
        assert_eq!(c.performance_security_expiry_date, None);
    }

    #[test]
    fn delivery_period_feeds_no_derivation() {
        let mut c = blank_contract();
        c.commencement_date = Some(date(2025, 1, 1));
        c.contract_delivery_period = Some(18);
        c.contract_delivery_period_measure = Some(DurationMeasure::Months);
        apply_contract_schedule(&mut c);
        assert_eq!(c.contract_expiry_date, None);
    }

    #[test]
    fn contract_schedule_is_idempotent() {
        let mut c = blank_contract();
        c.commencement_date = Some(date(2025, 1, 31));
        c.contract_duration = Some(2);
        c.contract_duration_measure = Some(DurationMeasure::Years);
        c.tender_security_validity_days = Some(60);
        apply_contract_schedule(&mut c);
        let first = c.clone();
        apply_contract_schedule(&mut c);
        assert_eq!(c, first);
    }
}
