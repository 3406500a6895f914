//! 床の上で行う向き固定のポーズ
//!
//! 撮影方向が決まっているので向きの判定は行わず、ROI のキーを直接評価する。

use super::{band, Arrow, Band, Check, Guidance, RuleContext, Slot, Verdict};
use crate::pose::{BodyLandmark as L, JointKey as J, Part};

/// 角度が `min` 以上なら合格、未満なら指示
fn at_least(
    ctx: &RuleContext<'_>,
    key: J,
    min: f32,
    message: &'static str,
    image: u8,
    arrow: Arrow,
) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= min {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new(message, image).with_arrow(arrow))
    }
}

/// 2 点とも見えていなければ判定しない
fn both_hidden(ctx: &RuleContext<'_>, a: L, b: L) -> bool {
    !ctx.visible(a) && !ctx.visible(b)
}

// --- Locust ---

pub(super) const LOCUST: &[Check] = &[
    Check::new(Slot::Joint(J::LeftKnee), locust_left_knee),
    Check::new(Slot::Joint(J::LeftEar), locust_gaze),
    Check::new(Slot::Joint(J::LeftElbow), locust_left_elbow),
    Check::new(Slot::Joint(J::LeftShoulder), locust_arms),
    Check::new(Slot::Joint(J::RightKnee), locust_right_knee),
    Check::new(Slot::Joint(J::RightElbow), locust_right_elbow),
    Check::new(Slot::Joint(J::RightHip), locust_thigh),
    Check::new(Slot::Joint(J::LeftFootIndex), locust_legs),
];

fn locust_left_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 140.0, 180.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("將右小腿放低", 2).with_arrow(ctx.push(L::LeftAnkle, 0.0, 1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("將右小腿抬高", 3).with_arrow(ctx.push(L::LeftAnkle, 0.0, -1.0)),
        ),
    }
}

fn locust_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::LeftEar, L::Nose) {
        return Verdict::Skip;
    }
    let ear_y = ctx.point(L::LeftEar).y;
    let nose_y = ctx.point(L::Nose).y;
    if (ear_y - nose_y).abs() <= 0.05 {
        Verdict::pass()
    } else if ear_y < nose_y {
        Verdict::fail(
            Guidance::new("請勿過度抬頭，目視前方", 4).with_arrow(ctx.push(L::Nose, 0.0, 1.0)),
        )
    } else {
        Verdict::fail(
            Guidance::new("請抬頭並目視前方", 4).with_arrow(ctx.push(L::Nose, 0.0, -1.0)),
        )
    }
}

fn locust_left_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 150.0, 180.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("將右手伸直", 5).with_arrow(ctx.push(L::LeftElbow, -1.0, 0.0)),
        )
    }
}

fn locust_arms(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 15.0, 45.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("將雙臂抬高", 6).with_arrow(ctx.push(L::LeftWrist, 0.0, -1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("請放低雙臂", 7).with_arrow(ctx.push(L::LeftWrist, 0.0, 1.0)),
        ),
    }
}

fn locust_right_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 150.0, 180.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("將左小腿放低", 2).with_arrow(ctx.push(L::RightAnkle, 0.0, 1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("將左小腿抬高", 3).with_arrow(ctx.push(L::RightAnkle, 0.0, -1.0)),
        ),
    }
}

fn locust_right_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 150.0, 180.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("將左手伸直", 5).with_arrow(ctx.push(L::RightElbow, -1.0, 0.0)),
        )
    }
}

fn locust_thigh(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::RightHip, L::RightKnee) {
        return Verdict::Skip;
    }
    if ctx.point(L::RightHip).y > ctx.point(L::RightKnee).y {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("將大腿抬高", 8).with_arrow(ctx.push(L::RightKnee, 0.0, -1.0)),
        )
    }
}

fn locust_legs(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::LeftFootIndex, L::LeftKnee) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftFootIndex).y < ctx.point(L::LeftKnee).y {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("將雙腿抬高", 8).with_arrow(ctx.push(L::LeftFootIndex, 0.0, -1.0)),
        )
    }
}

// --- Cobra ---

pub(super) const COBRA: &[Check] = &[
    Check::new(Slot::Joint(J::LeftHip), cobra_back),
    Check::new(Slot::Joint(J::LeftKnee), cobra_grounded),
    Check::new(Slot::Joint(J::LeftEar), cobra_gaze),
    Check::new(Slot::Both(Part::FootIndex), cobra_feet),
];

fn cobra_back(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 90.0, 135.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("請將肩膀放鬆，身體打直", 2)
                .with_arrow(ctx.push(L::LeftShoulder, 1.0, 0.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("請盡力將身體撐起並打直，勿駝背", 2)
                .with_arrow(ctx.push(L::LeftShoulder, -1.0, 0.0)),
        ),
    }
}

fn cobra_grounded(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::LeftHip, L::LeftKnee) {
        return Verdict::Skip;
    }
    let hip_y = ctx.point(L::LeftHip).y;
    if (hip_y - ctx.point(L::LeftKnee).y).abs() > 0.09 {
        return Verdict::fail(
            Guidance::new("請將膝蓋與髖部放至地面，勿抬起", 3)
                .with_arrow(ctx.push(L::LeftHip, 0.0, 1.0)),
        );
    }
    if hip_y <= ctx.point(L::LeftFootIndex).y && hip_y <= ctx.point(L::RightFootIndex).y {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將雙腳放至地面，勿抬起", 3)
                .with_arrow(ctx.push(L::RightFootIndex, 0.0, 1.0)),
        )
    }
}

fn cobra_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::LeftEar, L::Nose) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftEar).x < ctx.point(L::Nose).x {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請目視前方", 4).with_arrow(ctx.push(L::Nose, 1.0, 0.0)))
    }
}

fn cobra_feet(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(side) = key.side() else { return Verdict::Skip };
    let toe = side.landmark(Part::FootIndex);
    let ankle = side.landmark(Part::Ankle);
    if both_hidden(ctx, toe, ankle) {
        return Verdict::Skip;
    }
    if (ctx.point(toe).y - ctx.point(ankle).y).abs() <= 0.05 {
        return Verdict::pass();
    }
    // 画面の左右と利用者の左右は逆
    let message = match key {
        J::LeftFootIndex => "請將右腿放至地面，勿抬起",
        _ => "請將左腿放至地面，勿抬起",
    };
    Verdict::fail(Guidance::new(message, 3).with_arrow(ctx.push(ankle, 0.0, 1.0)))
}

// --- Boat ---

pub(super) const BOAT: &[Check] = &[
    Check::new(Slot::Joint(J::LeftShoulder), boat_arms),
    Check::new(Slot::Both(Part::Elbow), boat_elbow),
    Check::new(Slot::Joint(J::LeftHip), boat_legs_raised),
    Check::new(Slot::Both(Part::Knee), boat_knee),
    Check::new(Slot::Joint(J::LeftEar), boat_gaze),
];

fn boat_arms(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 25.0, 60.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("請將雙手抬高並與地面平行", 2)
                .with_arrow(ctx.push(L::LeftElbow, 0.0, -1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("請將雙手放低並與地面平行", 3)
                .with_arrow(ctx.push(L::LeftElbow, 0.0, 1.0)),
        ),
    }
}

fn boat_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let message = match key {
        J::LeftElbow => "請將右手伸直",
        _ => "請將左手伸直",
    };
    at_least(ctx, key, 120.0, message, 4, ctx.push(key.landmark(), -1.0, 0.0))
}

fn boat_legs_raised(ctx: &RuleContext<'_>, key: J) -> Verdict {
    if both_hidden(ctx, L::LeftHip, L::LeftKnee) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftHip).y - ctx.point(L::LeftKnee).y <= 0.022 {
        return Verdict::fail(
            Guidance::new("請將雙腿抬起", 7).with_arrow(ctx.push(L::LeftKnee, 0.0, -1.0)),
        );
    }
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 80.0, 150.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("請將腿放低，盡量和身體呈現90度", 5)
                .with_arrow(ctx.push(L::LeftKnee, 0.0, 1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("請將腿抬高，盡量和身體呈現90度", 6)
                .with_arrow(ctx.push(L::LeftKnee, 0.0, -1.0)),
        ),
    }
}

fn boat_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let message = match key {
        J::LeftKnee => "請將右腿伸直",
        _ => "請將左腿伸直",
    };
    at_least(ctx, key, 160.0, message, 8, ctx.push(key.landmark(), -1.0, 0.0))
}

fn boat_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::LeftEar, L::Nose) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftEar).x > ctx.point(L::Nose).x {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請目視前方", 9).with_arrow(ctx.push(L::Nose, -1.0, 0.0)))
    }
}

// --- Camel ---

pub(super) const CAMEL: &[Check] = &[
    Check::new(Slot::Joint(J::LeftElbow), camel_left_elbow),
    Check::new(Slot::Both(Part::Hip), camel_hip),
    Check::new(Slot::Both(Part::Knee), camel_knee),
    Check::new(Slot::Joint(J::RightElbow), camel_right_elbow),
    Check::new(Slot::Joint(J::RightShoulder), camel_hands),
    Check::new(Slot::Joint(J::RightEar), camel_head),
];

fn camel_left_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    at_least(ctx, key, 140.0, "將右手伸直", 2, ctx.push(L::LeftElbow, 0.0, 1.0))
}

fn camel_right_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    at_least(ctx, key, 140.0, "將左手伸直", 6, ctx.push(L::RightElbow, 0.0, 1.0))
}

fn camel_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 90.0, 150.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將臀部往前推，讓身體再向後仰多一點", 3)
                .with_arrow(ctx.push(key.landmark(), 0.0, 1.0)),
        )
    }
}

fn camel_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(side) = key.side() else { return Verdict::Skip };
    match band(angle, 65.0, 110.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("請將臀部往前推，盡量與小腿呈90度", 4)
                .with_arrow(ctx.push(side.landmark(Part::Hip), 1.0, 0.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("請將臀部往後移，盡量與小腿呈90度", 5)
                .with_arrow(ctx.push(side.landmark(Part::FootIndex), -1.0, 0.0)),
        ),
    }
}

fn camel_hands(ctx: &RuleContext<'_>, key: J) -> Verdict {
    at_least(
        ctx,
        key,
        45.0,
        "將雙手放置的位置往後一些",
        7,
        ctx.push(L::RightElbow, -1.0, 0.0),
    )
}

fn camel_head(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::RightEar, L::Nose) {
        return Verdict::Skip;
    }
    if ctx.point(L::RightEar).y > ctx.point(L::Nose).y {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請將頭向上仰", 8).with_arrow(ctx.push(L::Nose, 0.0, -1.0)))
    }
}

// --- Pigeon ---

pub(super) const PIGEON: &[Check] = &[
    Check::new(Slot::Joint(J::RightKnee), pigeon_back_leg),
    Check::new(Slot::Joint(J::RightHip), pigeon_hip),
    Check::new(Slot::Joint(J::RightShoulder), pigeon_torso),
    Check::new(Slot::Joint(J::RightElbow), pigeon_elbow),
    Check::new(Slot::Joint(J::LeftEar), pigeon_gaze),
    Check::new(Slot::Joint(J::LeftKnee), pigeon_front_leg),
];

fn pigeon_back_leg(ctx: &RuleContext<'_>, key: J) -> Verdict {
    at_least(
        ctx,
        key,
        140.0,
        "將左腿伸直並貼齊地面",
        2,
        ctx.push(L::RightKnee, -1.0, 0.0),
    )
}

fn pigeon_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    at_least(
        ctx,
        key,
        130.0,
        "將臀部盡量向下，充分伸展大腿內側",
        3,
        ctx.push(L::RightHip, 0.0, 1.0),
    )
}

fn pigeon_torso(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::RightShoulder, L::RightHip) {
        return Verdict::Skip;
    }
    let shoulder = ctx.point(L::RightShoulder);
    let hip = ctx.point(L::RightHip);
    if (shoulder.x - hip.x).abs() <= 0.1 && shoulder.y < hip.y {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將身體盡量打直", 4).with_arrow(ctx.push(L::RightShoulder, 0.0, -1.0)),
        )
    }
}

fn pigeon_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 165.0, 195.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("將雙手伸直", 5).with_arrow(ctx.push(L::RightElbow, 0.0, 1.0)),
        )
    }
}

fn pigeon_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if ctx.point(L::LeftEar).x < ctx.point(L::Nose).x {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請目視前方", 6).with_arrow(ctx.push(L::Nose, 1.0, 0.0)))
    }
}

fn pigeon_front_leg(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::LeftHip, L::LeftKnee) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftHip).x < ctx.point(L::LeftKnee).x {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將右腿放到身體前方", 7).with_arrow(ctx.push(L::LeftKnee, 1.0, 0.0)),
        )
    }
}

// --- Fish ---

pub(super) const FISH: &[Check] = &[
    Check::new(Slot::Both(Part::Knee), fish_knee),
    Check::new(Slot::Joint(J::LeftShoulder), fish_arch),
    Check::new(Slot::Joint(J::LeftMouth), fish_head),
];

fn fish_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let (message, image) = match key {
        J::RightKnee => ("請將左腿伸直", 2),
        _ => ("請將右腿伸直", 3),
    };
    at_least(ctx, key, 160.0, message, image, ctx.push(key.landmark(), -1.0, 0.0))
}

fn fish_arch(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let back = ctx.midpoint(L::LeftShoulder, L::LeftHip);
    match band(angle, 10.0, 60.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("將腰背拱起", 4).with_arrow(ctx.push_from(back, 0.0, -1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("勿將腰背過度拱起", 5).with_arrow(ctx.push_from(back, 0.0, 1.0)),
        ),
    }
}

fn fish_head(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if both_hidden(ctx, L::MouthLeft, L::LeftEye) {
        return Verdict::Skip;
    }
    // 頭頂が床に着くと目が口より下に来る
    if ctx.point(L::LeftEye).y - ctx.point(L::MouthLeft).y > 0.01 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將頭向後仰，盡量將頭頂貼近地板", 6)
                .with_arrow(ctx.push(L::MouthLeft, 0.0, 1.0)),
        )
    }
}
