use std::sync::Arc;

use handcards_core::gesture::{Gesture, Landmark, keypoint};
use handcards_core::model::CardStatus;
use handcards_core::session::GestureDisposition;
use handcards_core::time::fixed_clock;
use services::{AppServices, GestureLoop, LandmarkScript, ScriptedFrame};

/// Closed fist in a 640x480 frame; poses below reposition the thumb.
fn fist() -> Vec<Landmark> {
    vec![
        Landmark::new(320.0, 380.0), // wrist
        Landmark::new(270.0, 350.0), // thumb cmc
        Landmark::new(255.0, 315.0), // thumb mcp
        Landmark::new(250.0, 290.0), // thumb ip
        Landmark::new(248.0, 280.0), // thumb tip
        Landmark::new(300.0, 240.0), // index mcp
        Landmark::new(305.0, 260.0), // index pip
        Landmark::new(307.0, 280.0), // index dip
        Landmark::new(308.0, 320.0), // index tip
        Landmark::new(320.0, 238.0), // middle mcp
        Landmark::new(325.0, 262.0), // middle pip
        Landmark::new(327.0, 285.0), // middle dip
        Landmark::new(328.0, 324.0), // middle tip
        Landmark::new(340.0, 242.0), // ring mcp
        Landmark::new(345.0, 265.0), // ring pip
        Landmark::new(347.0, 287.0), // ring dip
        Landmark::new(348.0, 326.0), // ring tip
        Landmark::new(360.0, 250.0), // pinky mcp
        Landmark::new(364.0, 270.0), // pinky pip
        Landmark::new(366.0, 288.0), // pinky dip
        Landmark::new(367.0, 322.0), // pinky tip
    ]
}

fn thumbs_up() -> Vec<Landmark> {
    let mut pose = fist();
    pose[keypoint::THUMB_IP] = Landmark::new(250.0, 250.0);
    pose[keypoint::THUMB_TIP] = Landmark::new(248.0, 200.0);
    pose
}

fn thumbs_down() -> Vec<Landmark> {
    let mut pose = fist();
    pose[keypoint::THUMB_IP] = Landmark::new(250.0, 330.0);
    pose[keypoint::THUMB_TIP] = Landmark::new(248.0, 360.0);
    pose
}

fn palm() -> Vec<Landmark> {
    let mut pose = fist();
    pose[keypoint::INDEX_PIP] = Landmark::new(300.0, 200.0);
    pose[keypoint::INDEX_DIP] = Landmark::new(300.0, 170.0);
    pose[keypoint::INDEX_TIP] = Landmark::new(300.0, 140.0);
    pose[keypoint::MIDDLE_PIP] = Landmark::new(320.0, 195.0);
    pose[keypoint::MIDDLE_DIP] = Landmark::new(320.0, 160.0);
    pose[keypoint::MIDDLE_TIP] = Landmark::new(320.0, 130.0);
    pose[keypoint::RING_PIP] = Landmark::new(340.0, 200.0);
    pose[keypoint::RING_DIP] = Landmark::new(340.0, 168.0);
    pose[keypoint::RING_TIP] = Landmark::new(340.0, 140.0);
    pose[keypoint::PINKY_PIP] = Landmark::new(360.0, 215.0);
    pose[keypoint::PINKY_DIP] = Landmark::new(360.0, 185.0);
    pose[keypoint::PINKY_TIP] = Landmark::new(360.0, 160.0);
    pose
}

async fn services_with_cards(fronts: &[&str]) -> AppServices {
    let services = AppServices::in_memory(fixed_clock());
    for front in fronts {
        services
            .capture()
            .save_card(front, "answer")
            .await
            .unwrap();
    }
    services
}

#[tokio::test]
async fn replayed_gestures_mark_and_advance_with_cooldown() {
    let services = services_with_cards(&["one", "two", "three"]).await;
    let mut session = services.start_review().await.unwrap();

    // Thumbs-up fires, a palm lands inside the cooldown window and is
    // ignored, a later palm fires again.
    let script = LandmarkScript::new(vec![
        ScriptedFrame::single_hand(100, thumbs_up()),
        ScriptedFrame::single_hand(100, palm()),
        ScriptedFrame::single_hand(2000, palm()),
        ScriptedFrame::empty(33),
    ]);
    let (mut source, detector) = script.into_replay(fixed_clock().now());
    let gesture_loop = GestureLoop::new(Arc::new(detector));

    let outcomes = gesture_loop.run(&mut session, &mut source).await;
    assert_eq!(outcomes.len(), 4);

    assert_eq!(outcomes[0].gesture, Some(Gesture::ThumbsUp));
    assert!(matches!(
        outcomes[0].disposition,
        Some(GestureDisposition::Applied(_))
    ));
    assert_eq!(
        outcomes[1].disposition,
        Some(GestureDisposition::CoolingDown)
    );
    assert!(matches!(
        outcomes[2].disposition,
        Some(GestureDisposition::Applied(_))
    ));
    assert_eq!(outcomes[3].gesture, None);

    // One mark and two advances: Easy on the first card, now showing the
    // third.
    assert_eq!(session.cards()[0].status, CardStatus::Easy);
    assert_eq!(session.cards()[1].status, CardStatus::New);
    assert_eq!(session.current_index(), 2);
}

#[tokio::test]
async fn thumbs_down_marks_the_card_wrong() {
    let services = services_with_cards(&["one", "two"]).await;
    let mut session = services.start_review().await.unwrap();

    let script = LandmarkScript::new(vec![ScriptedFrame::single_hand(100, thumbs_down())]);
    let (mut source, detector) = script.into_replay(fixed_clock().now());
    let gesture_loop = GestureLoop::new(Arc::new(detector));

    gesture_loop.run(&mut session, &mut source).await;

    assert_eq!(session.cards()[0].status, CardStatus::Wrong);
    assert_eq!(session.current_index(), 1);
}

#[tokio::test]
async fn gesture_marks_stay_in_the_session_only() {
    let services = services_with_cards(&["one", "two"]).await;
    let mut session = services.start_review().await.unwrap();

    let script = LandmarkScript::new(vec![ScriptedFrame::single_hand(100, thumbs_up())]);
    let (mut source, detector) = script.into_replay(fixed_clock().now());
    GestureLoop::new(Arc::new(detector))
        .run(&mut session, &mut source)
        .await;

    assert_eq!(session.cards()[0].status, CardStatus::Easy);

    // The stored collection never sees gesture marks; only the working
    // copy changes.
    let stored = services.cards().load_all().await.unwrap();
    assert!(stored.iter().all(|c| c.status == CardStatus::New));
}

#[tokio::test]
async fn gestures_against_an_empty_collection_report_no_cards() {
    let services = AppServices::in_memory(fixed_clock());
    let mut session = services.start_review().await.unwrap();

    let script = LandmarkScript::new(vec![ScriptedFrame::single_hand(100, palm())]);
    let (mut source, detector) = script.into_replay(fixed_clock().now());
    let outcomes = GestureLoop::new(Arc::new(detector))
        .run(&mut session, &mut source)
        .await;

    assert_eq!(outcomes[0].disposition, Some(GestureDisposition::NoCards));
}
