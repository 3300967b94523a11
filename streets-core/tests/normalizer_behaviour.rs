//! Behavioural tests for accepting and rejecting street candidates.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use streets_core::{RejectionReason, StreetNormalizer, StreetRecord, Verdict};

#[fixture]
fn candidate() -> RefCell<Option<StreetRecord>> {
    RefCell::new(None)
}

#[fixture]
fn verdict() -> RefCell<Option<Verdict>> {
    RefCell::new(None)
}

fn prepare(target: &RefCell<Option<StreetRecord>>, name: &str, latitude: f64, longitude: f64) {
    *target.borrow_mut() = Some(StreetRecord::new(name).with_coordinates(latitude, longitude));
}

fn expect_rejection(verdict: &RefCell<Option<Verdict>>) -> RejectionReason {
    verdict
        .borrow()
        .as_ref()
        .expect("candidate was normalized")
        .rejection()
        .expect("expected a rejection")
}

#[given("a candidate named \"High Street\" at 51.50, -0.10 with no highway type")]
fn given_high_street(#[from(candidate)] candidate: &RefCell<Option<StreetRecord>>) {
    prepare(candidate, "High Street", 51.50, -0.10);
}

#[given("a candidate named \"Unnamed Road\" at 51.50, -0.10 with no highway type")]
fn given_unnamed_road(#[from(candidate)] candidate: &RefCell<Option<StreetRecord>>) {
    prepare(candidate, "Unnamed Road", 51.50, -0.10);
}

#[given("a candidate named \"Ab\" at 51.50, -0.10 with no highway type")]
fn given_short_name(#[from(candidate)] candidate: &RefCell<Option<StreetRecord>>) {
    prepare(candidate, "Ab", 51.50, -0.10);
}

#[given("a candidate named \"Oxford Street\" at 10.0, 10.0 with no highway type")]
fn given_far_away(#[from(candidate)] candidate: &RefCell<Option<StreetRecord>>) {
    prepare(candidate, "Oxford Street", 10.0, 10.0);
}

#[when("I normalize the candidate")]
fn when_normalize(
    #[from(candidate)] candidate: &RefCell<Option<StreetRecord>>,
    #[from(verdict)] verdict: &RefCell<Option<Verdict>>,
) {
    let outcome = {
        let guard = candidate.borrow();
        let record = guard.as_ref().expect("candidate prepared");
        StreetNormalizer::default().normalize(record)
    };
    *verdict.borrow_mut() = Some(outcome);
}

#[then("the candidate is accepted")]
fn then_accepted(#[from(verdict)] verdict: &RefCell<Option<Verdict>>) {
    let guard = verdict.borrow();
    let outcome = guard.as_ref().expect("candidate was normalized");
    assert!(outcome.is_accepted(), "expected acceptance, got {outcome:?}");
}

#[then("the highway type is the default label")]
fn then_default_type(#[from(verdict)] verdict: &RefCell<Option<Verdict>>) {
    let street = verdict
        .borrow()
        .clone()
        .and_then(Verdict::accepted)
        .expect("accepted street");
    assert_eq!(street.highway_type, "unclassified");
    assert_eq!(street.name, "High Street");
}

#[then("the candidate is rejected as a blocklisted pattern")]
fn then_blocklisted(#[from(verdict)] verdict: &RefCell<Option<Verdict>>) {
    assert_eq!(expect_rejection(verdict), RejectionReason::BlocklistedPattern);
}

#[then("the candidate is rejected as too short")]
fn then_too_short(#[from(verdict)] verdict: &RefCell<Option<Verdict>>) {
    assert_eq!(expect_rejection(verdict), RejectionReason::TooShort);
}

#[then("the candidate is rejected as out of bounds")]
fn then_out_of_bounds(#[from(verdict)] verdict: &RefCell<Option<Verdict>>) {
    assert_eq!(expect_rejection(verdict), RejectionReason::OutOfBounds);
}

#[scenario(path = "tests/features/street_normalizer.feature", index = 0)]
fn scenario_plausible_street(
    candidate: RefCell<Option<StreetRecord>>,
    verdict: RefCell<Option<Verdict>>,
) {
    let _ = (candidate, verdict);
}

#[scenario(path = "tests/features/street_normalizer.feature", index = 1)]
fn scenario_placeholder_name(
    candidate: RefCell<Option<StreetRecord>>,
    verdict: RefCell<Option<Verdict>>,
) {
    let _ = (candidate, verdict);
}

#[scenario(path = "tests/features/street_normalizer.feature", index = 2)]
fn scenario_short_name(
    candidate: RefCell<Option<StreetRecord>>,
    verdict: RefCell<Option<Verdict>>,
) {
    let _ = (candidate, verdict);
}

#[scenario(path = "tests/features/street_normalizer.feature", index = 3)]
fn scenario_outside_envelope(
    candidate: RefCell<Option<StreetRecord>>,
    verdict: RefCell<Option<Verdict>>,
) {
    let _ = (candidate, verdict);
}
