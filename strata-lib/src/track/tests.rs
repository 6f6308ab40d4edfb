use super::*;
use crate::clip::recording::{event_log, take_events, RecordingClip, EventLog};
use crate::clip::{ClipFades, Condition, ConditionType};
use crate::random::{seeded_source, ScriptedRandom};

const COMBAT: i32 = 5;

fn track() -> MusicTrack {
    MusicTrack::with_random("music", seeded_source(7))
}

fn loop_clip(name: &str, log: &EventLog) -> RecordingClip {
    RecordingClip::new(name, log)
}

fn combat_clip(name: &str, value: i32, log: &EventLog) -> RecordingClip {
    RecordingClip::new(name, log)
        .with_kind(ClipKind::Conditional)
        .with_condition(Condition::new(COMBAT, ConditionType::Equal, value, 0))
}

fn source(track: &MusicTrack, id: Option<ClipId>) -> Option<String> {
    id.and_then(|id| track.clip(id)).map(|clip| clip.source_id().to_string())
}

fn mix_frames(track: &mut MusicTrack, frames: usize) -> Vec<f32> {
    let mut buffer = vec![0.0; frames];
    track.mix(&mut buffer, 1, false);
    buffer
}

#[test]
fn empty_track_plays_silently() {
    let mut track = track();
    assert!(track.play().is_ok());
    assert!(!track.is_playing());
    assert_eq!(track.playing_info(), "");
    assert_eq!(mix_frames(&mut track, 4), vec![0.0; 4]);
}

#[test]
fn clips_route_by_kind_then_weight() {
    let log = event_log();
    let mut track = track();
    let intro = track.attach_clip(loop_clip("intro", &log).with_kind(ClipKind::Intro).boxed());
    let end = track.attach_clip(
        loop_clip("end", &log)
            .with_kind(ClipKind::End)
            .with_chance(80)
            .boxed(),
    );
    let cond = track.attach_clip(combat_clip("combat", 1, &log).with_chance(50).boxed());
    let weighted = track.attach_clip(loop_clip("sting", &log).with_chance(30).boxed());
    let plain = track.attach_clip(loop_clip("plain", &log).boxed());

    assert_eq!(track.intro(), Some(intro));
    assert_eq!(track.end(), Some(end));
    assert_eq!(track.conditional(), &[cond]);
    assert_eq!(track.weighted(), &[weighted]);
    assert_eq!(track.loops(), &[plain]);
}

#[test]
fn second_end_clip_replaces_the_first() {
    let log = event_log();
    let mut track = track();
    let first = track.attach_clip(loop_clip("end-a", &log).with_kind(ClipKind::End).boxed());
    let second = track.attach_clip(loop_clip("end-b", &log).with_kind(ClipKind::End).boxed());
    let intro_a = track.attach_clip(loop_clip("intro-a", &log).with_kind(ClipKind::Intro).boxed());
    let intro_b = track.attach_clip(loop_clip("intro-b", &log).with_kind(ClipKind::Intro).boxed());

    assert_eq!(first, second);
    assert_eq!(intro_a, intro_b);
    assert_eq!(track.clip_count(), 2);
    assert_eq!(source(&track, track.end()), Some("end-b".to_string()));
    assert_eq!(source(&track, track.intro()), Some("intro-b".to_string()));
    assert!(track.loops().is_empty());
    assert!(track.weighted().is_empty());
}

#[test]
fn play_starts_with_intro_then_moves_to_loop() {
    let log = event_log();
    let mut track = track();
    let intro = track.attach_clip(
        loop_clip("intro", &log)
            .with_kind(ClipKind::Intro)
            .with_length(3, 0)
            .boxed(),
    );
    let main = track.attach_clip(loop_clip("main", &log).boxed());

    track.play().expect("play");
    assert_eq!(track.current(), Some(intro));

    mix_frames(&mut track, 3);
    assert_eq!(track.current(), Some(main));
    assert_eq!(track.tail(), Some(TailState { clip: intro, position: 3 }));
    assert_eq!(track.fading(), None);
}

#[test]
fn finished_clip_becomes_tail_and_selection_runs_once() {
    let log = event_log();
    let mut track = track();
    let main = track.attach_clip(loop_clip("main", &log).with_length(3, 5).boxed());
    track.play().expect("play");
    assert_eq!(take_events(&log), vec!["open:main"]);

    mix_frames(&mut track, 2);
    assert_eq!(track.tail(), None);
    assert!(take_events(&log).is_empty());

    mix_frames(&mut track, 1);
    assert_eq!(track.tail(), Some(TailState { clip: main, position: 3 }));
    assert_eq!(track.current(), Some(main));
    assert_eq!(track.fading(), None);
    assert_eq!(take_events(&log), vec!["open:main"]);
}

#[test]
fn tail_mixes_alongside_current_until_exhausted() {
    let log = event_log();
    let mut track = track();
    let main = track.attach_clip(loop_clip("main", &log).with_length(3, 2).boxed());
    track.play().expect("play");

    let first_pass = mix_frames(&mut track, 3);
    assert_eq!(first_pass, vec![1.0, 1.0, 1.0]);

    let overlap = mix_frames(&mut track, 1);
    assert_eq!(overlap, vec![2.0]);
    assert_eq!(track.tail(), Some(TailState { clip: main, position: 4 }));

    mix_frames(&mut track, 1);
    assert_eq!(track.tail(), None);
    assert!(track.is_playing());
}

#[test]
fn full_weight_clip_is_always_selected() {
    let log = event_log();
    let mut track = track();
    let sting = track.attach_clip(loop_clip("sting", &log).with_chance(100).boxed());
    track.attach_clip(loop_clip("plain", &log).boxed());

    for _ in 0..200 {
        track.play().expect("play");
        assert_eq!(track.current(), Some(sting));
    }
    track.stop();
    track.play().expect("play");
    assert_eq!(track.current(), Some(sting));
}

#[test]
fn draw_above_every_weight_falls_through_to_loops() {
    let log = event_log();
    let mut track = MusicTrack::with_random("music", Box::new(ScriptedRandom::new(vec![50, 90])));
    track.attach_clip(loop_clip("rare-a", &log).with_chance(10).boxed());
    track.attach_clip(loop_clip("rare-b", &log).with_chance(20).boxed());
    let plain = track.attach_clip(loop_clip("plain", &log).boxed());

    track.play().expect("play");
    assert_eq!(track.current(), Some(plain));
}

#[test]
fn weighted_pick_respects_attachment_order_on_ties() {
    let log = event_log();
    let mut track = MusicTrack::with_random("music", Box::new(ScriptedRandom::new(vec![40])));
    let first = track.attach_clip(loop_clip("first", &log).with_chance(40).boxed());
    track.attach_clip(loop_clip("second", &log).with_chance(40).boxed());

    track.play().expect("play");
    assert_eq!(track.current(), Some(first));
}

#[test]
fn weighted_pool_is_skipped_while_an_unweighted_loop_plays() {
    let log = event_log();
    // First draw misses the sting; every later draw would hit it.
    let random = ScriptedRandom::new(vec![90, 0, 0, 0, 0]);
    let mut track = MusicTrack::with_random("music", Box::new(random));
    let sting = track.attach_clip(loop_clip("sting", &log).with_chance(50).boxed());
    let plain = track.attach_clip(loop_clip("plain", &log).with_length(3, 0).boxed());

    track.play().expect("play");
    assert_eq!(track.current(), Some(plain));

    for _ in 0..4 {
        mix_frames(&mut track, 3);
        assert_eq!(track.current(), Some(plain));
    }

    // From idle the weighted pool is consulted again.
    track.stop();
    track.play().expect("play");
    assert_eq!(track.current(), Some(sting));
}

#[test]
fn loop_pool_never_repeats_immediately() {
    let log = event_log();
    let mut track = track();
    for name in ["a", "b", "c"] {
        track.attach_clip(loop_clip(name, &log).boxed());
    }

    track.play().expect("play");
    for _ in 0..300 {
        let previous = track.current();
        track.play().expect("play");
        assert!(track.current().is_some());
        assert_ne!(track.current(), previous);
    }
}

#[test]
fn single_pickable_loop_may_repeat() {
    let log = event_log();
    let mut track = track();
    let gated = track.attach_clip(
        loop_clip("gated", &log)
            .with_condition(Condition::new(MAIN_LOOP_CONDITION, ConditionType::Equal, 1, 0))
            .boxed(),
    );
    let open = track.attach_clip(loop_clip("open", &log).boxed());

    track.play().expect("play");
    assert!(!track.clip(gated).expect("clip").is_pickable());
    for _ in 0..20 {
        track.play().expect("play");
        assert_eq!(track.current(), Some(open));
    }
}

#[test]
fn no_pickable_loop_means_nothing_to_play() {
    let log = event_log();
    let mut track = track();
    for name in ["a", "b"] {
        track.attach_clip(
            loop_clip(name, &log)
                .with_condition(Condition::new(MAIN_LOOP_CONDITION, ConditionType::Greater, 5, 0))
                .boxed(),
        );
    }

    track.play().expect("play");
    assert_eq!(track.current(), None);
    assert!(!track.is_playing());
}

#[test]
fn main_loop_condition_updates_pickability_and_starts_idle_track() {
    let log = event_log();
    let mut track = track();
    let calm = track.attach_clip(
        loop_clip("calm", &log)
            .with_condition(Condition::new(MAIN_LOOP_CONDITION, ConditionType::Equal, 2, 0))
            .boxed(),
    );
    let tense = track.attach_clip(
        loop_clip("tense", &log)
            .with_condition(Condition::new(MAIN_LOOP_CONDITION, ConditionType::Equal, 3, 0))
            .boxed(),
    );
    track.attach_clip(combat_clip("combat", 2, &log).boxed());

    track.set_condition(MAIN_LOOP_CONDITION, 2).expect("condition");
    assert_eq!(track.current(), Some(calm));
    assert!(track.clip(calm).expect("clip").is_pickable());
    assert!(!track.clip(tense).expect("clip").is_pickable());

    track.set_condition(MAIN_LOOP_CONDITION, 3).expect("condition");
    assert_eq!(track.current(), Some(calm));
    assert!(track.clip(tense).expect("clip").is_pickable());
}

#[test]
fn condition_without_movement_switches_immediately() {
    let log = event_log();
    let mut track = track();
    track.set_fades(TrackFades {
        xfade_in: 20,
        xfade_out: 50,
        ..TrackFades::default()
    });
    let main = track.attach_clip(loop_clip("main", &log).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    take_events(&log);

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.current(), Some(combat));
    assert_eq!(track.fading(), Some(main));
    assert_eq!(track.pending_switch(), None);
    assert_eq!(
        take_events(&log),
        vec!["open:combat", "fade_in:combat:20", "fade_out:main:50"]
    );
}

#[test]
fn crossfade_durations_resolve_incoming_then_outgoing_then_track() {
    let log = event_log();
    let mut track = track();
    track.set_fades(TrackFades {
        xfade_in: 9,
        xfade_out: 13,
        ..TrackFades::default()
    });
    track.attach_clip(
        loop_clip("main", &log)
            .with_fades(ClipFades {
                xfade_in: 7,
                xfade_out: 11,
                ..ClipFades::default()
            })
            .boxed(),
    );
    track.attach_clip(
        combat_clip("combat", 1, &log)
            .with_fades(ClipFades {
                xfade_in: 5,
                ..ClipFades::default()
            })
            .boxed(),
    );
    track.play().expect("play");
    take_events(&log);

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(
        take_events(&log),
        vec!["open:combat", "fade_in:combat:5", "fade_out:main:11"]
    );
}

#[test]
fn outgoing_clip_without_fade_out_is_released() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.current(), Some(combat));
    assert_eq!(track.fading(), None);
}

#[test]
fn condition_with_movement_waits_for_bar_boundary() {
    let log = event_log();
    let mut track = track();
    let main = track.attach_clip(loop_clip("main", &log).with_movement(2, 10).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    mix_frames(&mut track, 5);

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(
        track.pending_switch(),
        Some(PendingSwitch {
            target: Some(combat),
            remaining: 15,
        })
    );
    assert_eq!(track.current(), Some(main));

    for _ in 0..14 {
        mix_frames(&mut track, 1);
        assert_eq!(track.current(), Some(main));
    }
    assert_eq!(track.pending_switch().map(|pending| pending.remaining), Some(1));

    mix_frames(&mut track, 1);
    assert_eq!(track.current(), Some(combat));
    assert_eq!(track.pending_switch(), None);
}

#[test]
fn movement_quantizes_to_next_boundary() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).with_movement(2, 10).boxed());
    track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    mix_frames(&mut track, 20);

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.pending_switch().map(|pending| pending.remaining), Some(20));
}

#[test]
fn zero_length_movement_switches_immediately() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).with_movement(2, 0).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.pending_switch(), None);
    assert_eq!(track.current(), Some(combat));
}

#[test]
fn pending_switch_is_never_preempted() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).with_movement(1, 10).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.attach_clip(
        loop_clip("boss", &log)
            .with_kind(ClipKind::Conditional)
            .with_condition(Condition::new(9, ConditionType::Equal, 1, 0))
            .boxed(),
    );
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    track.set_condition(9, 1).expect("condition");
    track.set_condition(MAIN_LOOP_CONDITION, 4).expect("condition");
    assert_eq!(
        track.pending_switch(),
        Some(PendingSwitch {
            target: Some(combat),
            remaining: 10,
        })
    );
}

#[test]
fn condition_clearing_falls_back_to_main_loop() {
    let log = event_log();
    let mut track = track();
    let main = track.attach_clip(loop_clip("main", &log).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.current(), Some(combat));

    track.set_condition(COMBAT, 0).expect("condition");
    assert_eq!(track.current(), Some(main));
}

#[test]
fn newly_matching_clip_wins_over_fallback() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    let low = track.attach_clip(combat_clip("low", 1, &log).boxed());
    let high = track.attach_clip(combat_clip("high", 2, &log).boxed());
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.current(), Some(low));

    track.set_condition(COMBAT, 2).expect("condition");
    assert_eq!(track.current(), Some(high));
}

#[test]
fn last_matching_clip_is_the_switch_target() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    let any_combat = || {
        loop_clip("combat", &log)
            .with_kind(ClipKind::Conditional)
            .with_condition(Condition::new(COMBAT, ConditionType::Greater, 0, 0))
            .boxed()
    };
    let first = track.attach_clip(any_combat());
    let last = track.attach_clip(any_combat());
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(track.current(), Some(last));
    assert_ne!(track.current(), Some(first));
}

#[test]
fn last_matching_clip_is_the_scheduled_target() {
    let log = event_log();
    let mut track = track();
    let main = track.attach_clip(loop_clip("main", &log).with_movement(1, 10).boxed());
    let any_combat = || {
        loop_clip("combat", &log)
            .with_kind(ClipKind::Conditional)
            .with_condition(Condition::new(COMBAT, ConditionType::Greater, 0, 0))
            .boxed()
    };
    track.attach_clip(any_combat());
    let last = track.attach_clip(any_combat());
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(
        track.pending_switch(),
        Some(PendingSwitch {
            target: Some(last),
            remaining: 10,
        })
    );
    assert_eq!(track.current(), Some(main));

    mix_frames(&mut track, 10);
    assert_eq!(track.current(), Some(last));
}

#[test]
fn repeated_condition_causes_no_second_switch() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");

    track.set_condition(COMBAT, 1).expect("condition");
    take_events(&log);
    track.set_condition(COMBAT, 1).expect("condition");
    assert!(take_events(&log).is_empty());
    assert_eq!(track.current(), Some(combat));
}

#[test]
fn conditional_clip_loops_in_place() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    let combat = track.attach_clip(combat_clip("combat", 1, &log).with_length(3, 2).boxed());
    track.play().expect("play");
    track.set_condition(COMBAT, 1).expect("condition");
    take_events(&log);

    mix_frames(&mut track, 3);
    assert_eq!(track.current(), Some(combat));
    assert_eq!(track.tail(), Some(TailState { clip: combat, position: 3 }));
    assert_eq!(take_events(&log), vec!["open:combat"]);
}

#[test]
fn end_clip_rings_out_without_a_successor() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    let end = track.attach_clip(
        loop_clip("end", &log)
            .with_kind(ClipKind::End)
            .with_length(2, 3)
            .boxed(),
    );
    track.current = Some(end);
    track.clips[end.0].open();

    mix_frames(&mut track, 2);
    assert_eq!(track.current(), None);
    assert_eq!(track.tail(), Some(TailState { clip: end, position: 2 }));
    assert!(track.is_playing());

    mix_frames(&mut track, 3);
    assert!(!track.is_playing());
}

#[test]
fn play_is_rejected_while_mix_lock_is_held() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).with_length(3, 4).boxed());
    track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    mix_frames(&mut track, 3);
    let before = (track.current(), track.tail(), track.fading());

    let lock = track.mix_lock();
    let guard = lock.acquire();
    assert_eq!(
        track.play(),
        Err(TrackError::Locked {
            track: "music".to_string(),
        })
    );
    assert!(track.set_condition(COMBAT, 1).is_err());
    assert_eq!((track.current(), track.tail(), track.fading()), before);

    drop(guard);
    assert!(track.play().is_ok());
}

#[test]
fn mix_releases_its_lock() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    track.play().expect("play");
    mix_frames(&mut track, 8);
    assert!(!track.mix_lock().is_held());
}

#[test]
fn stop_with_fade_out_moves_current_to_fading() {
    let log = event_log();
    let mut track = track();
    track.set_fades(TrackFades {
        fade_out: 30,
        ..TrackFades::default()
    });
    let main = track.attach_clip(loop_clip("main", &log).boxed());
    track.play().expect("play");
    take_events(&log);

    track.stop();
    assert_eq!(track.current(), None);
    assert_eq!(track.fading(), Some(main));
    assert_eq!(take_events(&log), vec!["fade_out:main:30"]);
    assert!(!track.is_playing());

    mix_frames(&mut track, 30);
    assert_eq!(track.fading(), None);
}

#[test]
fn stop_without_fade_out_drops_everything() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).with_length(3, 10).with_movement(1, 10).boxed());
    track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    mix_frames(&mut track, 3);
    track.set_condition(COMBAT, 1).expect("condition");
    assert!(track.pending_switch().is_some());
    assert!(track.tail().is_some());

    track.stop();
    assert_eq!(track.current(), None);
    assert_eq!(track.fading(), None);
    assert_eq!(track.tail(), None);
    assert_eq!(track.pending_switch(), None);
}

#[test]
fn play_fade_in_prefers_clip_then_track() {
    let log = event_log();
    let mut track = track();
    track.set_fades(TrackFades {
        fade_in: 40,
        ..TrackFades::default()
    });
    track.attach_clip(
        loop_clip("main", &log)
            .with_fades(ClipFades {
                fade_in: 12,
                ..ClipFades::default()
            })
            .boxed(),
    );
    track.play().expect("play");
    assert_eq!(take_events(&log), vec!["open:main", "fade_in:main:12"]);

    // Already playing: no start fade.
    track.play().expect("play");
    assert_eq!(take_events(&log), vec!["open:main"]);

    let mut plain = MusicTrack::with_random("plain", seeded_source(1));
    plain.set_fades(TrackFades {
        fade_in: 40,
        ..TrackFades::default()
    });
    plain.attach_clip(loop_clip("bed", &log).boxed());
    plain.play().expect("play");
    assert_eq!(take_events(&log), vec!["open:bed", "fade_in:bed:40"]);
}

#[test]
fn playing_info_lists_active_clips() {
    let log = event_log();
    let mut track = track();
    track.set_fades(TrackFades {
        xfade_out: 10,
        ..TrackFades::default()
    });
    track.attach_clip(loop_clip("main", &log).with_length(4, 6).boxed());
    track.attach_clip(combat_clip("combat", 1, &log).boxed());
    track.play().expect("play");
    assert_eq!(track.playing_info(), " current = main (pos=0)");

    mix_frames(&mut track, 4);
    mix_frames(&mut track, 1);
    assert_eq!(
        track.playing_info(),
        " current = main (pos=1) tail = main (pos=5)"
    );

    track.set_condition(COMBAT, 1).expect("condition");
    assert_eq!(
        track.playing_info(),
        " current = combat (pos=0) tail = main (pos=5) fading = main (pos=1)"
    );
}

#[test]
fn volume_scales_and_clipping_is_reported_not_altered() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).with_level(0.8).with_length(1, 4).boxed());
    track.play().expect("play");
    track.set_volume(2.0);

    let mut buffer = vec![0.0_f32; 2];
    track.mix(&mut buffer, 1, true);
    assert_eq!(buffer[0], 1.6);
    assert_eq!(buffer[1], 3.2);
}

#[test]
fn partial_frames_and_zero_channels_are_ignored() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("main", &log).boxed());
    track.play().expect("play");

    let mut buffer = vec![0.0_f32; 3];
    track.mix(&mut buffer, 2, false);
    assert_eq!(buffer, vec![1.0, 0.0, 0.0]);

    track.mix(&mut buffer, 0, false);
    assert_eq!(buffer, vec![1.0, 0.0, 0.0]);
}

#[test]
fn info_reports_groups() {
    let log = event_log();
    let mut track = track();
    track.attach_clip(loop_clip("intro", &log).with_kind(ClipKind::Intro).boxed());
    track.attach_clip(loop_clip("a", &log).boxed());
    track.attach_clip(loop_clip("b", &log).boxed());
    track.attach_clip(loop_clip("w", &log).with_chance(10).boxed());

    let info = track.info();
    assert_eq!(info.name, "music");
    assert!(info.intro);
    assert!(!info.end);
    assert_eq!(info.loops, 2);
    assert_eq!(info.weighted, 1);
    assert_eq!(info.conditional, 0);
    assert!(!info.playing);
}
