//! 側面から撮影するポーズ
//!
//! どれも最初に NOSE で体の向きを決め、以降は向きの側の関節だけを評価する。
//! 合否は左右のキーに同時に書き込む。

use std::cmp::Ordering;

use super::{band, Band, Check, Guidance, RuleContext, Slot, Verdict};
use crate::pose::{BodyLandmark as L, JointKey as J, Part, Side};

/// 鼻の x が 2 点の両方より大きいか小さいか。間にあれば None
fn nose_beyond(ctx: &RuleContext<'_>, a: L, b: L) -> Option<Ordering> {
    let nose = ctx.point(L::Nose).x;
    let (ax, bx) = (ctx.point(a).x, ctx.point(b).x);
    if nose > ax && nose > bx {
        Some(Ordering::Greater)
    } else if nose < ax && nose < bx {
        Some(Ordering::Less)
    } else {
        None
    }
}

/// 左向きなら `dx`、右向きなら `-dx`
fn lean(ctx: &RuleContext<'_>, dx: f32) -> f32 {
    match ctx.side {
        Some(Side::Right) => -dx,
        _ => dx,
    }
}

// --- Plank ---

pub(super) const PLANK: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), plank_side),
    Check::new(Slot::Facing(Part::Ankle), plank_toes),
    Check::new(Slot::Facing(Part::Knee), plank_knee),
    Check::new(Slot::Facing(Part::Eye), plank_head),
    Check::new(Slot::Facing(Part::Elbow), plank_elbow),
    Check::new(Slot::Facing(Part::Shoulder), plank_shoulder),
    Check::new(Slot::Facing(Part::Hip), plank_hip),
];

const PLANK_REPOSITION: &str =
    "請將身體朝左方或右方趴下，並將雙手撐在肩膀下方，將身體撐起，使身體呈現一斜線";

fn plank_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::new(PLANK_REPOSITION, 10));
    }
    match nose_beyond(ctx, L::LeftHip, L::RightHip) {
        Some(Ordering::Greater) => Verdict::Facing(Side::Right),
        Some(_) => Verdict::Facing(Side::Left),
        None => Verdict::Abort(Guidance::new(PLANK_REPOSITION, 10)),
    }
}

fn plank_toes(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let ankle = ctx.facing(Part::Ankle);
    let toe = ctx.facing(Part::FootIndex);
    if !ctx.visible(ankle) && !ctx.visible(toe) {
        return Verdict::Skip;
    }
    if ctx.point(ankle).y < ctx.point(toe).y {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請用前腳掌將身體撐起", 9).with_arrow(ctx.push(toe, 0.0, -1.0)),
        )
    }
}

fn plank_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 160.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將雙腿伸直並讓大腿到腳踝成一直線", 8)
                .with_arrow(ctx.push(ctx.facing(Part::Knee), 0.0, 1.0)),
        )
    }
}

fn plank_head(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let Some(side) = ctx.side else { return Verdict::Skip };
    // 高さはカメラに近い側で測り、矢印は向きの側の目に付ける
    let near = side.opposite();
    let shoulder = near.landmark(Part::Shoulder);
    let eye = near.landmark(Part::Eye);
    let elbow = near.landmark(Part::Elbow);
    if !ctx.visible(shoulder) && !ctx.visible(eye) {
        return Verdict::Skip;
    }

    let shoulder_y = ctx.point(shoulder).y;
    let lift = (shoulder_y - ctx.point(eye).y).abs();
    let arm = (shoulder_y - ctx.point(elbow).y).abs();
    if lift >= arm * 0.05 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將頭抬起，保持頸椎平行於地面", 1)
                .with_arrow(ctx.push(side.landmark(Part::Eye), 0.0, -1.0)),
        )
    }
}

fn plank_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let elbow = ctx.facing(Part::Elbow);
    let elbow_x = ctx.point(elbow).x;
    let shoulder_x = ctx.point(ctx.facing(Part::Shoulder)).x;
    if (elbow_x - shoulder_x).abs() < 0.15 && angle > 150.0 {
        return Verdict::pass_pair();
    }

    let guidance = match (ctx.side, elbow_x > shoulder_x) {
        (Some(Side::Right), true) => Guidance::new(
            "請將手臂打直，並將手肘向後縮並確認手肘位置在肩關節下方",
            2,
        )
        .with_arrow(ctx.push(elbow, -1.0, 0.0)),
        (Some(Side::Left), false) => Guidance::new(
            "請將手臂打直，手肘向後縮並確認手肘位置在肩關節下方",
            2,
        )
        .with_arrow(ctx.push(elbow, 1.0, 0.0)),
        (Some(Side::Left), true) => Guidance::new(
            "請將手臂打直，手肘向前移並確認手肘位置在肩關節下方",
            3,
        )
        .with_arrow(ctx.push(elbow, -1.0, 0.0)),
        _ => Guidance::new("請將手臂打直，手肘向前移並確認手肘位置在肩關節下方", 3)
            .with_arrow(ctx.push(elbow, 1.0, 0.0)),
    };
    Verdict::fail_pair(guidance)
}

fn plank_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let elbow = ctx.facing(Part::Elbow);
    match band(angle, 60.0, 85.0) {
        Band::Within => Verdict::pass_pair(),
        Band::Below => Verdict::fail_pair(
            Guidance::new(
                "請將肩膀向後移並確認手軸於肩膀下方，維持頸椎、胸椎、腰椎維持一直線平行於地面",
                4,
            )
            .with_arrow(ctx.push(elbow, -1.0, 0.0)),
        ),
        Band::Above => Verdict::fail_pair(
            Guidance::new(
                "請將身體向前移並確認手軸於肩膀下方，維持頸椎、胸椎、腰椎維持一直線平行於地面",
                5,
            )
            .with_arrow(ctx.push(elbow, 1.0, 0.0)),
        ),
    }
}

fn plank_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(side) = ctx.side else { return Verdict::Skip };
    let hip = side.landmark(Part::Hip);
    let sag = ctx.point(side.opposite().landmark(Part::Hip)).y - ctx.point(L::Nose).y;

    if angle >= 165.0 && sag <= 0.2 {
        Verdict::pass_pair()
    } else if angle < 165.0 {
        Verdict::fail_pair(
            Guidance::new("請將屁股稍微放下", 6).with_arrow(ctx.push(hip, 0.0, 1.0)),
        )
    } else {
        Verdict::fail_pair(
            Guidance::new("請將屁股稍微抬起", 7).with_arrow(ctx.push(hip, 0.0, -1.0)),
        )
    }
}

// --- Reverse Plank ---

pub(super) const REVERSE_PLANK: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), reverse_plank_side),
    Check::new(Slot::Facing(Part::Elbow), reverse_plank_elbow),
    Check::new(Slot::Facing(Part::Index), reverse_plank_fingers),
    Check::new(Slot::Facing(Part::Wrist), reverse_plank_wrist),
    Check::new(Slot::Facing(Part::Shoulder), reverse_plank_chest),
    Check::new(Slot::Facing(Part::Hip), reverse_plank_hip),
    Check::new(Slot::Facing(Part::Knee), reverse_plank_knee),
];

const REVERSE_PLANK_REPOSITION: &str =
    "請將身體面向右方或左方坐下，並將雙手撐在肩膀下方，使上半身呈現斜線";

/// 指先の許容幅
const FINGER_TOLERANCE: f32 = 2.0;

fn reverse_plank_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::new(REVERSE_PLANK_REPOSITION, 6));
    }
    match nose_beyond(ctx, L::LeftHip, L::RightHip) {
        Some(Ordering::Greater) => Verdict::Facing(Side::Left),
        Some(_) => Verdict::Facing(Side::Right),
        None => Verdict::Abort(Guidance::new(REVERSE_PLANK_REPOSITION, 6)),
    }
}

fn reverse_plank_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle >= sample - 10.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將雙手向後伸，指尖朝前，將手軸打直", 1)
                .with_arrow(ctx.push(ctx.facing(Part::Elbow), 0.0, 1.0)),
        )
    }
}

fn reverse_plank_fingers(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let index_x = ctx.point(ctx.facing(Part::Index)).x;
    let shoulder_x = ctx.point(ctx.facing(Part::Shoulder)).x;
    let toward_hips = match ctx.side {
        Some(Side::Right) => index_x + FINGER_TOLERANCE > shoulder_x,
        _ => index_x < shoulder_x + FINGER_TOLERANCE,
    };
    if toward_hips {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將雙手手指朝向臀部，並將手臂打直，垂直於地面", 2)
                .with_arrow(ctx.push(ctx.facing(Part::Wrist), lean(ctx, -1.0), 0.0)),
        )
    }
}

fn reverse_plank_wrist(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let wrist = ctx.facing(Part::Wrist);
    let elbow = ctx.facing(Part::Elbow);
    if !ctx.visible(wrist) || !ctx.visible(elbow) {
        return Verdict::Skip;
    }
    if (ctx.point(elbow).x - ctx.point(wrist).x).abs() < 0.15 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將手掌平貼於地面，讓肩膀、手軸、手腕成一直線垂直於地面", 2)
                .with_arrow(ctx.push(elbow, 0.0, 1.0)),
        )
    }
}

fn reverse_plank_chest(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 55.0, 85.0) == Band::Within {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("胸往前挺並保持臀部抬起", 3)
                .with_arrow(ctx.push(ctx.facing(Part::Hip), 0.0, -1.0)),
        )
    }
}

fn reverse_plank_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle >= sample - 7.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將臀部抬高一些，使身體保持一直線", 4)
                .with_arrow(ctx.push(ctx.facing(Part::Hip), 0.0, -1.0)),
        )
    }
}

fn reverse_plank_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle >= sample - 10.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請將雙腳膝蓋打直，使身體保持一直線", 5)
                .with_arrow(ctx.span(ctx.facing(Part::Knee), ctx.facing(Part::Ankle))),
        )
    }
}

// --- Child's pose ---

pub(super) const CHILD: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), child_side),
    Check::new(Slot::Facing(Part::Knee), child_knee),
    Check::new(Slot::Facing(Part::Hip), child_hip),
    Check::new(Slot::Facing(Part::Shoulder), child_shoulder),
    Check::new(Slot::Facing(Part::Elbow), child_elbow),
];

const CHILD_REPOSITION: &str = "請將身體面向右方或左方以跪姿坐下";

fn child_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let (left_hip, right_hip) = (ctx.point(L::LeftHip).x, ctx.point(L::RightHip).x);
    let (left_knee, right_knee) = (ctx.point(L::LeftKnee).x, ctx.point(L::RightKnee).x);
    // 顔が伏せて見えないときは膝の張り出しで判断する
    let right_tucked = right_knee < right_hip && (right_knee - right_hip).abs() > 0.2;
    let left_tucked = left_knee > left_hip && (left_knee - left_hip).abs() > 0.2;

    let by_nose = if ctx.visible(L::Nose) {
        nose_beyond(ctx, L::LeftHip, L::RightHip)
    } else {
        None
    };
    match by_nose {
        Some(Ordering::Less) => Verdict::Facing(Side::Right),
        _ if right_tucked => Verdict::Facing(Side::Right),
        Some(Ordering::Greater) => Verdict::Facing(Side::Left),
        _ if left_tucked => Verdict::Facing(Side::Left),
        _ => Verdict::Abort(Guidance::new(CHILD_REPOSITION, 5)),
    }
}

fn child_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 45.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認雙腿是否已經屈膝", 1)
                .with_arrow(ctx.pull(ctx.facing(Part::Knee), 0.0, 1.0)),
        )
    }
}

fn child_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle <= sample + 10.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將身體向前趴下", 2)
                .with_arrow(ctx.pull(ctx.facing(Part::Hip), 0.0, -1.0)),
        )
    }
}

fn child_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 120.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將手臂向上舉直", 3)
                .with_arrow(ctx.push(ctx.facing(Part::Elbow), lean(ctx, -1.0), 0.0)),
        )
    }
}

fn child_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let knee = ctx.facing(Part::Knee);
    let elbow = ctx.facing(Part::Elbow);
    if !ctx.visible(knee) || !ctx.visible(elbow) {
        return Verdict::Skip;
    }
    if angle >= 130.0 && (ctx.point(knee).y - ctx.point(elbow).y).abs() < 0.1 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將手臂向前伸直", 4).with_arrow(ctx.pull(elbow, 0.0, -1.0)),
        )
    }
}

// --- Downward dog ---

pub(super) const DOWNWARD_DOG: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), downward_dog_side),
    Check::new(Slot::Facing(Part::Shoulder), downward_dog_shoulder),
    Check::new(Slot::Facing(Part::Elbow), downward_dog_elbow),
    Check::new(Slot::Facing(Part::Hip), downward_dog_hip),
    Check::new(Slot::Facing(Part::Knee), downward_dog_knee),
    Check::new(Slot::Facing(Part::Ankle), downward_dog_heel),
];

const DOWNWARD_DOG_REPOSITION: &str =
    "請將身體面向右方或左方雙膝跪地，再用雙手撐地將臀部向上撐起成倒V字型";

fn downward_dog_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::new(DOWNWARD_DOG_REPOSITION, 6));
    }
    match nose_beyond(ctx, L::LeftHip, L::RightHip) {
        Some(Ordering::Greater) => Verdict::Facing(Side::Right),
        Some(_) => Verdict::Facing(Side::Left),
        None => Verdict::Abort(Guidance::new(DOWNWARD_DOG_REPOSITION, 6)),
    }
}

fn downward_dog_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 120.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將手臂打直，並將臀部向上撐起", 7)
                .with_arrow(ctx.push(ctx.facing(Part::Shoulder), lean(ctx, -1.0), 1.0)),
        )
    }
}

fn downward_dog_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 100.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認手掌是否已經貼至地面", 3)
                .with_arrow(ctx.pull(ctx.facing(Part::Wrist), 0.0, -1.0)),
        )
    }
}

fn downward_dog_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if band(angle, sample - 15.0, sample + 15.0) == Band::Within {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將身體向下伸展且把背打直, 呈現倒v字型", 2)
                .with_arrow(ctx.push(ctx.facing(Part::Shoulder), 0.0, 1.0)),
        )
    }
}

fn downward_dog_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認雙腿是否已經打直", 4)
                .with_arrow(ctx.span(ctx.facing(Part::Hip), ctx.facing(Part::Ankle))),
        )
    }
}

fn downward_dog_heel(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let heel = ctx.facing(Part::Heel);
    let toe = ctx.facing(Part::FootIndex);
    if !ctx.visible(heel) || !ctx.visible(toe) {
        return Verdict::Skip;
    }
    if (ctx.point(toe).y - ctx.point(heel).y).abs() < 0.1 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認腳跟是否已經貼地", 5)
                .with_arrow(ctx.pull(ctx.facing(Part::Ankle), 0.0, -1.0)),
        )
    }
}

// --- Low Lunge ---

pub(super) const LOW_LUNGE: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), low_lunge_side),
    Check::new(Slot::Facing(Part::Knee), low_lunge_back_leg),
    Check::new(Slot::Away(Part::Knee), low_lunge_front_leg),
    Check::new(Slot::Facing(Part::Hip), low_lunge_hip),
    Check::new(Slot::Facing(Part::Shoulder), low_lunge_shoulder),
    Check::new(Slot::Facing(Part::Elbow), low_lunge_arms),
];

const LOW_LUNGE_REPOSITION: &str = "請將身體面向右方或左方成低弓箭步姿，並將雙手向上舉起";

/// 利用者から見た (向きの側, 反対側) の左右の呼び方
fn lunge_words(ctx: &RuleContext<'_>) -> (&'static str, &'static str) {
    match ctx.side {
        Some(Side::Right) => ("左", "右"),
        _ => ("右", "左"),
    }
}

fn low_lunge_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::LeftShoulder) || !ctx.visible(L::RightShoulder) {
        return Verdict::Abort(Guidance::new(LOW_LUNGE_REPOSITION, 5));
    }
    match nose_beyond(ctx, L::LeftShoulder, L::RightShoulder) {
        Some(Ordering::Less) => Verdict::Facing(Side::Right),
        Some(_) => Verdict::Facing(Side::Left),
        None => Verdict::Abort(Guidance::new(LOW_LUNGE_REPOSITION, 5)),
    }
}

fn low_lunge_back_leg(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 100.0 {
        return Verdict::pass();
    }
    let (direction, _) = lunge_words(ctx);
    Verdict::fail(
        Guidance::new(format!("請確認是否將{}腳向後伸", direction), 1)
            .with_arrow(ctx.pull(key.landmark(), 0.0, -1.0)),
    )
}

fn low_lunge_front_leg(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 90.0 {
        return Verdict::pass();
    }
    let (_, direction) = lunge_words(ctx);
    Verdict::fail(
        Guidance::new(format!("請確認是否已經將{}腳屈膝", direction), 2)
            .with_arrow(ctx.pull(key.landmark(), 0.0, -1.0)),
    )
}

fn low_lunge_hip(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let Some(side) = ctx.side else { return Verdict::Skip };
    let hip = side.landmark(Part::Hip);
    let front_knee = side.opposite().landmark(Part::Knee);
    if !ctx.visible(hip) || !ctx.visible(front_knee) {
        return Verdict::Skip;
    }
    if ctx.point(hip).y > ctx.point(front_knee).y {
        return Verdict::pass_pair();
    }
    let (direction, _) = lunge_words(ctx);
    Verdict::fail(
        Guidance::new(
            format!("請確認是否已經將{}腳向後伸，並將上半身向下壓低", direction),
            3,
        )
        .with_arrow(ctx.pull(hip, 0.0, -1.0)),
    )
}

fn low_lunge_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將手臂打直，並向上舉", 4)
                .with_arrow(ctx.push(ctx.facing(Part::Shoulder), 0.0, -1.0)),
        )
    }
}

fn low_lunge_arms(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if !ctx.visible(L::Nose) {
        return Verdict::Skip;
    }
    let nose_y = ctx.point(L::Nose).y;
    let overhead =
        ctx.point(L::RightElbow).y <= nose_y || ctx.point(L::LeftElbow).y <= nose_y;
    if overhead && angle >= 150.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認手掌是否已經將手臂打直且舉高過頭", 4)
                .with_arrow(ctx.push(ctx.facing(Part::Elbow), 0.0, -1.0)),
        )
    }
}

// --- Seated Forward Bend ---

pub(super) const SEATED_FORWARD_BEND: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), seated_side),
    Check::new(Slot::Facing(Part::Knee), seated_knee),
    Check::new(Slot::Facing(Part::Shoulder), seated_reach),
    Check::new(Slot::Facing(Part::Elbow), seated_elbow),
    Check::new(Slot::Facing(Part::Hip), seated_fold),
    Check::new(Slot::Facing(Part::Ankle), seated_ankle),
];

const SEATED_REPOSITION: &str = "請將身體面向右方或左方坐下，並將腳伸直";

fn seated_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::new(SEATED_REPOSITION, 5));
    }
    match nose_beyond(ctx, L::LeftShoulder, L::RightShoulder) {
        Some(Ordering::Greater) => Verdict::Facing(Side::Right),
        Some(_) => Verdict::Facing(Side::Left),
        None => Verdict::Abort(Guidance::new(SEATED_REPOSITION, 5)),
    }
}

fn seated_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將雙腳向前伸直", 3)
                .with_arrow(ctx.push(ctx.facing(Part::Knee), lean(ctx, -1.0), 0.0)),
        )
    }
}

fn seated_reach(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if (80.0..120.0).contains(&angle) {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將身體向前彎曲，並將手臂向前伸", 1)
                .with_arrow(ctx.push(ctx.facing(Part::Elbow), lean(ctx, -1.0), 0.0)),
        )
    }
}

fn seated_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將手臂打直", 1)
                .with_arrow(ctx.push(ctx.facing(Part::Elbow), lean(ctx, -1.0), 0.0)),
        )
    }
}

fn seated_fold(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 75.0 {
        return Verdict::pass_pair();
    }
    let waist = ctx.midpoint(ctx.facing(Part::Hip), ctx.facing(Part::Shoulder));
    let d = lean(ctx, 1.0);
    Verdict::fail_pair(
        Guidance::new("請確認是否已經將身體向前彎，盡量碰觸到腳板", 2)
            .with_arrow(ctx.pull_to(waist, d, d)),
    )
}

fn seated_ankle(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 130.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否將腳踝輕微勾回", 4)
                .with_arrow(ctx.push(ctx.facing(Part::FootIndex), lean(ctx, 1.0), 0.0)),
        )
    }
}

// --- Bridge ---

pub(super) const BRIDGE: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), bridge_side),
    Check::new(Slot::Facing(Part::Knee), bridge_knee),
    Check::new(Slot::Facing(Part::Elbow), bridge_palms),
    Check::new(Slot::Facing(Part::Shoulder), bridge_lift),
    Check::new(Slot::Facing(Part::Hip), bridge_hip),
];

const BRIDGE_REPOSITION: &str = "請將身體平躺下，並將雙手放置於身體兩側";

fn bridge_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::new(BRIDGE_REPOSITION, 5));
    }
    // 仰向けでは膝が頭と反対側にある
    if ctx.point(L::LeftHip).x > ctx.point(L::LeftKnee).x {
        Verdict::Facing(Side::Left)
    } else if ctx.point(L::RightHip).x < ctx.point(L::RightKnee).x {
        Verdict::Facing(Side::Right)
    } else {
        Verdict::Abort(Guidance::new(BRIDGE_REPOSITION, 5))
    }
}

fn bridge_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 80.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將雙腳屈膝", 1)
                .with_arrow(ctx.pull(ctx.facing(Part::Knee), 0.0, -1.0)),
        )
    }
}

fn bridge_palms(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle >= sample - 25.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認手掌是否已經貼至地面", 2)
                .with_arrow(ctx.pull(ctx.facing(Part::Wrist), 0.0, -1.0)),
        )
    }
}

fn bridge_lift(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 45.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請利用核心力量將臀部撐起", 3)
                .with_arrow(ctx.push(ctx.facing(Part::Hip), 0.0, -1.0)),
        )
    }
}

fn bridge_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將身體挺直，並與大腿形成一條直線", 4)
                .with_arrow(ctx.span(ctx.facing(Part::Shoulder), ctx.facing(Part::Knee))),
        )
    }
}

// --- Pyramid ---

pub(super) const PYRAMID: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), pyramid_side),
    Check::new(Slot::Joint(J::Leg), pyramid_stride),
    Check::new(Slot::Facing(Part::Hip), pyramid_fold),
    Check::new(Slot::Facing(Part::Knee), pyramid_knee),
    Check::new(Slot::Facing(Part::Shoulder), pyramid_hands),
    Check::new(Slot::Facing(Part::Elbow), pyramid_elbow),
];

const PYRAMID_REPOSITION: &str = "請將身體面向左方或右方，將其中一隻腳向前跨，並將雙腿打直";

fn pyramid_side(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::new(PYRAMID_REPOSITION, 6));
    }
    match nose_beyond(ctx, L::LeftShoulder, L::RightShoulder) {
        Some(Ordering::Greater) => Verdict::Facing(Side::Right),
        Some(_) => Verdict::Facing(Side::Left),
        None => Verdict::Abort(Guidance::new(PYRAMID_REPOSITION, 6)),
    }
}

fn pyramid_stride(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 90.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認是否已經將其中一隻腳向前跨", 1)
                .with_arrow(ctx.push(ctx.facing(Part::Knee), 1.0, 0.0)),
        )
    }
}

fn pyramid_fold(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 110.0 {
        return Verdict::pass_pair();
    }
    let waist = ctx.midpoint(ctx.facing(Part::Hip), ctx.facing(Part::Shoulder));
    Verdict::fail_pair(
        Guidance::new("請確認是否已經將身體向前腳彎曲", 3)
            .with_arrow(ctx.pull_to(waist, lean(ctx, 1.0), -1.0)),
    )
}

fn pyramid_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle >= sample - 20.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將雙腳打直", 2)
                .with_arrow(ctx.span(ctx.facing(Part::Hip), ctx.facing(Part::Ankle))),
        )
    }
}

fn pyramid_hands(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    let index = ctx.facing(Part::Index);
    let ankle = ctx.facing(Part::Ankle);
    if !ctx.visible(index) || !ctx.visible(ankle) {
        return Verdict::Skip;
    }
    if ctx.point(ankle).y <= ctx.point(index).y + 0.2 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認是否已經將手臂放置於前腳兩側，小心不要遮擋到腳踝視線", 5)
                .with_arrow(ctx.span(ctx.facing(Part::Shoulder), ctx.facing(Part::Wrist))),
        )
    }
}

fn pyramid_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 90.0 {
        Verdict::pass_pair()
    } else {
        Verdict::fail_pair(
            Guidance::new("請確認手臂是否已經向下伸直", 4)
                .with_arrow(ctx.span(ctx.facing(Part::Shoulder), ctx.facing(Part::Wrist))),
        )
    }
}
