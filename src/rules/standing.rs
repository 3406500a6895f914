//! 正面から撮影する立位のポーズ

use super::{band, Band, Check, Guidance, RuleContext, Slot, Verdict};
use crate::pose::{BodyLandmark as L, JointKey as J, Part, Side};

// --- Tree ---

pub(super) const TREE: &[Check] = &[
    Check::new(Slot::Joint(J::RightKnee), tree_standing_knee),
    Check::new(Slot::Joint(J::LeftFootIndex), tree_raised_foot),
    Check::new(Slot::Joint(J::LeftKnee), tree_raised_knee),
    Check::new(Slot::Joint(J::LeftHip), tree_raised_hip),
    Check::new(Slot::Both(Part::Shoulder), tree_shoulder),
    Check::new(Slot::Both(Part::Elbow), tree_elbow),
    Check::new(Slot::Both(Part::Index), tree_hands),
];

fn tree_standing_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 170.0, 180.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("將左腳打直平均分配雙腳重量，勿將右腳重量全放在左腳大腿", 1)
                .with_arrow(ctx.push(L::RightKnee, 0.0, 1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("請勿將右腳重量全放在左腳大腿，避免傾斜造成左腳負擔", 1)
                .with_arrow(ctx.pull(L::RightKnee, -1.0, 0.0)),
        ),
    }
}

fn tree_raised_foot(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::LeftFootIndex) && !ctx.visible(L::RightKnee) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftFootIndex).y <= ctx.point(L::RightKnee).y {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new(
                "請將右腳抬至高於左腳膝蓋的位置，勿將右腳放在左腳膝蓋上，避免造成膝蓋負擔",
                2,
            )
            .with_arrow(ctx.pull(L::LeftFootIndex, 1.0, 0.0)),
        )
    }
}

fn tree_raised_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    // 膝が股関節より前に出ている量
    let forward = (ctx.point(L::LeftHip).z - ctx.point(L::LeftKnee).z) * 100.0;

    if angle <= 65.0 && forward <= 17.0 {
        Verdict::pass()
    } else if angle > 65.0 {
        Verdict::fail(
            Guidance::new("請將右腳再抬高一些，不可壓到左腳膝蓋", 1)
                .with_arrow(ctx.push(L::LeftKnee, 0.0, -1.0)),
        )
    } else {
        Verdict::fail(
            Guidance::new("將臂部往前推，打開左右骨盆，右腳膝蓋不可向前傾", 3)
                .with_arrow(ctx.pull(L::LeftHip, 1.0, -1.0)),
        )
    }
}

fn tree_raised_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 100.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認右腳膝蓋是否已經抬至左腳膝蓋以上", 2)
                .with_arrow(ctx.pull(L::LeftKnee, 1.0, -1.0)),
        )
    }
}

fn tree_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 120.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將雙手合掌並互相施力，往上伸展至頭頂正上方", 4)
                .with_arrow(ctx.push(key.landmark(), 0.0, -1.0)),
        )
    }
}

fn tree_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    let Some(sample) = ctx.sample(key) else { return Verdict::Skip };
    if angle >= sample - 10.0 {
        return Verdict::pass();
    }
    let dx = if key.side() == Some(Side::Left) { 1.0 } else { -1.0 };
    Verdict::fail(
        Guidance::new("請將雙手再往上伸展，使手軸貼近耳朵", 5)
            .with_arrow(ctx.pull(key.landmark(), dx, 0.0)),
    )
}

fn tree_hands(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let index = key.landmark();
    let x = ctx.point(index).x;
    if x < ctx.point(L::RightShoulder).x {
        Verdict::fail(
            Guidance::new("請將雙手往右移動，保持在頭頂正上方", 6)
                .with_arrow(ctx.push(index, 1.0, 0.0)),
        )
    } else if x > ctx.point(L::LeftShoulder).x {
        Verdict::fail(
            Guidance::new("請將雙手往左移動，保持在頭頂正上方", 7)
                .with_arrow(ctx.push(index, -1.0, 0.0)),
        )
    } else {
        Verdict::pass()
    }
}

// --- Warrior II ---

pub(super) const WARRIOR_II: &[Check] = &[
    Check::new(Slot::Joint(J::LeftAnkle), warrior_front_foot),
    Check::new(Slot::Joint(J::LeftKnee), warrior_front_knee),
    Check::new(Slot::Joint(J::RightKnee), warrior_back_knee),
    Check::new(Slot::Both(Part::Hip), warrior_hip),
    Check::new(Slot::Joint(J::Nose), warrior_gaze),
    Check::new(Slot::Both(Part::Shoulder), warrior_shoulder),
    Check::new(Slot::Both(Part::Elbow), warrior_elbow),
];

const WARRIOR_SHIFT_DETAILED: &str = "請將重心往右移動移動，並且小腿與地面保持垂直";

fn warrior_front_foot(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::LeftKnee) && !ctx.visible(L::LeftHip) {
        return Verdict::Skip;
    }
    if ctx.point(L::LeftHip).x <= ctx.point(L::LeftKnee).x {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將右腳腳尖朝向右手邊", 1)
                .with_arrow(ctx.push(L::LeftFootIndex, 1.0, 0.0)),
        )
    }
}

fn warrior_front_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    if !ctx.visible(L::LeftAnkle) && !ctx.visible(L::LeftKnee) {
        return Verdict::Skip;
    }
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    // すねが垂直から外れている量
    let drift = (ctx.point(L::LeftAnkle).x - ctx.point(L::LeftKnee).x).abs();

    if (90.0..=150.0).contains(&angle) && drift <= 0.08 {
        Verdict::pass()
    } else if drift > 0.08 {
        let message = ctx.wording("請將身體下壓，右腳再彎曲一些", WARRIOR_SHIFT_DETAILED);
        Verdict::fail(Guidance::new(message, 2).with_arrow(ctx.push(L::LeftKnee, 1.0, 0.0)))
    } else if angle < 90.0 {
        Verdict::fail(
            Guidance::new("臀部不可低於右腳膝蓋，請將左腳往內收回使臀部高於右腳膝蓋", 2)
                .with_arrow(ctx.push(L::RightKnee, 1.0, 0.0)),
        )
    } else {
        let message = ctx.wording("請將左腳再往後一些，並將臀部向下壓", WARRIOR_SHIFT_DETAILED);
        Verdict::fail(Guidance::new(message, 2).with_arrow(ctx.push(L::RightKnee, -1.0, 0.0)))
    }
}

fn warrior_back_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 165.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將左腳膝蓋打直，並將左腳腳尖朝向前方", 3)
                .with_arrow(ctx.span(L::RightKnee, L::RightAnkle)),
        )
    }
}

fn warrior_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 100.0 {
        return Verdict::pass();
    }
    let arrow = match key.side() {
        Some(Side::Right) => ctx.push(L::RightKnee, -1.0, 0.0),
        _ => ctx.push(L::LeftKnee, 1.0, 0.0),
    };
    Verdict::fail(Guidance::new("請將雙腳再拉開一些距離，臀部向前推並挺胸", 4).with_arrow(arrow))
}

fn warrior_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::LeftHip) && !ctx.visible(L::RightHip) && !ctx.visible(L::Nose) {
        return Verdict::Skip;
    }
    let nose = ctx.point(L::Nose).x;
    let to_left = (nose - ctx.point(L::LeftHip).x).abs();
    let to_right = (nose - ctx.point(L::RightHip).x).abs();
    if to_left < to_right {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將頭轉向彎曲腳的方向並直視前方", 5)
                .with_arrow(ctx.push(L::Nose, 1.0, 0.0)),
        )
    }
}

fn warrior_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        return Verdict::pass();
    }
    let Some(side) = key.side() else { return Verdict::Skip };
    let elbow = side.landmark(Part::Elbow);
    let shoulder = side.landmark(Part::Shoulder);
    let (raise, lower) = match side {
        Side::Left => (
            "請將右手抬高，與肩膀呈水平，並將身體挺直朝向前方",
            "請將右手放低 ，與肩膀呈水平，並將身體挺直朝向前方",
        ),
        Side::Right => (
            "請將左手抬高，與肩膀呈水平，並將身體挺直朝向前方",
            "請將左手放低，與肩膀呈水平，並將身體挺直朝向前方",
        ),
    };
    if ctx.point(elbow).y - ctx.point(shoulder).y > 0.05 {
        Verdict::fail(Guidance::new(raise, 6).with_arrow(ctx.push(elbow, 0.0, -1.0)))
    } else {
        Verdict::fail(Guidance::new(lower, 6).with_arrow(ctx.push(elbow, 0.0, 1.0)))
    }
}

fn warrior_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 160.0 {
        return Verdict::pass();
    }
    let Some(side) = key.side() else { return Verdict::Skip };
    let message = match side {
        Side::Left => "請將右手手心朝下平放並打直右手",
        Side::Right => "請將左手手心朝下平放並打直左手",
    };
    Verdict::fail(
        Guidance::new(message, 7)
            .with_arrow(ctx.span(side.landmark(Part::Elbow), side.landmark(Part::Wrist))),
    )
}

// --- Mountain ---

pub(super) const MOUNTAIN: &[Check] = &[
    Check::new(Slot::Joint(J::Nose), mountain_head),
    Check::new(Slot::Both(Part::Shoulder), mountain_shoulder),
    Check::new(Slot::Both(Part::Elbow), mountain_elbow),
    Check::new(Slot::Both(Part::Hip), mountain_hip),
    Check::new(Slot::Both(Part::Knee), mountain_knee),
    Check::new(Slot::Both(Part::Ankle), mountain_feet),
];

fn mountain_head(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Abort(Guidance::text("請將頭部正面向前方"));
    }
    let nose = ctx.point(L::Nose).x;
    let left_hip = ctx.point(L::LeftHip).x;
    let right_hip = ctx.point(L::RightHip).x;
    if (nose - (left_hip + right_hip) / 2.0).abs() <= 0.1 {
        return Verdict::pass();
    }
    let arrow = if (nose - left_hip).abs() > (nose - right_hip).abs() {
        ctx.pull(L::RightEye, -1.0, 0.0)
    } else {
        ctx.pull(L::LeftEye, 1.0, 0.0)
    };
    Verdict::fail(Guidance::new("請將頭面向正前方", 2).with_arrow(arrow))
}

fn mountain_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 80.0, 100.0) == Band::Within {
        return Verdict::pass();
    }
    let dx = if key.side() == Some(Side::Left) { 1.0 } else { -1.0 };
    Verdict::fail(Guidance::new("請保持雙肩平行", 3).with_arrow(ctx.pull(key.landmark(), dx, 0.0)))
}

fn mountain_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 160.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將雙臂伸直，放置身體兩側，並將手掌朝向前方", 4)
                .with_arrow(ctx.push(key.landmark(), 0.0, 1.0)),
        )
    }
}

fn mountain_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 120.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將雙腳直立於地面", 5).with_arrow(ctx.push(key.landmark(), 0.0, 1.0)),
        )
    }
}

fn mountain_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 160.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將雙腿伸直併攏", 5).with_arrow(ctx.push(key.landmark(), 0.0, 1.0)),
        )
    }
}

fn mountain_feet(ctx: &RuleContext<'_>, key: J) -> Verdict {
    if !ctx.visible(L::LeftAnkle) || !ctx.visible(L::RightAnkle) {
        return Verdict::Abort(Guidance::new("請確保腳踝能被檢測到", 6));
    }
    if (ctx.point(L::LeftAnkle).y - ctx.point(L::RightAnkle).y).abs() <= 0.05 {
        return Verdict::pass();
    }
    let side = key.side().unwrap_or(Side::Left);
    Verdict::fail(
        Guidance::new("請將雙腳平行站立於地面", 6)
            .with_arrow(ctx.push(side.landmark(Part::Knee), 0.0, 1.0)),
    )
}

// --- Triangle ---

pub(super) const TRIANGLE: &[Check] = &[
    Check::new(Slot::Joint(J::LeftHip), triangle_stance),
    Check::new(Slot::Joint(J::LeftShoulder), triangle_left_shoulder),
    Check::new(Slot::Joint(J::RightShoulder), triangle_right_shoulder),
    Check::new(Slot::Joint(J::RightFootIndex), triangle_front_foot),
    Check::new(Slot::Joint(J::RightHip), triangle_bend),
    Check::new(Slot::Joint(J::LeftElbow), triangle_upper_arm),
    Check::new(Slot::Joint(J::RightElbow), triangle_lower_arm),
    Check::new(Slot::Joint(J::RightEye), triangle_gaze),
    Check::new(Slot::Joint(J::RightKnee), triangle_front_knee),
    Check::new(Slot::Joint(J::LeftKnee), triangle_back_knee),
];

const TRIANGLE_ARMS: &str = "請將雙手手臂平舉打直";

fn triangle_stance(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 50.0, 100.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認是否已經將右腳向右跨，使雙腳呈現大字型", 3)
                .with_arrow(ctx.push(L::LeftKnee, 1.0, 0.0)),
        )
    }
}

fn triangle_left_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new(TRIANGLE_ARMS, 4).with_arrow(ctx.push(L::LeftElbow, 1.0, 0.0)))
    }
}

fn triangle_right_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 145.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new(TRIANGLE_ARMS, 4).with_arrow(ctx.push(L::RightElbow, -1.0, 0.0)),
        )
    }
}

fn triangle_front_foot(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::RightFootIndex) {
        return Verdict::Notice(Guidance::text("請確認腳踝是否位於鏡頭範圍之內"));
    }
    if ctx.point(L::RightFootIndex).x < ctx.point(L::RightHeel).x {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認是否已經將左腳向左轉", 5)
                .with_arrow(ctx.push(L::RightFootIndex, -1.0, 0.0)),
        )
    }
}

fn triangle_bend(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle <= 100.0 {
        Verdict::pass()
    } else {
        let waist = ctx.midpoint(L::RightHip, L::RightShoulder);
        Verdict::fail(
            Guidance::new("請確認是否已經將身體向左腳下彎", 6)
                .with_arrow(ctx.push_from(waist, 0.0, 1.0)),
        )
    }
}

fn triangle_upper_arm(ctx: &RuleContext<'_>, key: J) -> Verdict {
    if !ctx.visible(L::LeftWrist) {
        return Verdict::Notice(Guidance::text("請確認右手腕是否位於鏡頭範圍內"));
    }
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if ctx.point(L::LeftWrist).y < ctx.point(L::LeftElbow).y && angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認是否已經將右手舉直並向上拉高", 7)
                .with_arrow(ctx.push(L::LeftElbow, 0.0, -1.0)),
        )
    }
}

fn triangle_lower_arm(ctx: &RuleContext<'_>, key: J) -> Verdict {
    if !ctx.visible(L::RightWrist) {
        return Verdict::Notice(Guidance::text("請確認左手腕是否位於鏡頭範圍內"));
    }
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if ctx.point(L::RightElbow).y < ctx.point(L::RightWrist).y && angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認是否已經將左手向下舉直", 8)
                .with_arrow(ctx.push(L::RightElbow, 0.0, 1.0)),
        )
    }
}

fn triangle_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::Nose) {
        return Verdict::Skip;
    }
    if ctx.point(L::Nose).y < ctx.point(L::RightEye).y {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請確認是否已經將眼睛向上看", 9)
                .with_arrow(ctx.push(L::RightEye, 0.0, -1.0)),
        )
    }
}

fn triangle_front_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請勿將重心過度偏左，將左腳打直", 10)
                .with_arrow(ctx.pull(L::RightKnee, -1.0, -1.0)),
        )
    }
}

fn triangle_back_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請勿將重心過度偏右，將右腳打直", 10)
                .with_arrow(ctx.pull(L::LeftKnee, 1.0, -1.0)),
        )
    }
}

// --- Half moon ---

pub(super) const HALF_MOON: &[Check] = &[
    Check::new(Slot::Joint(J::RightKnee), half_moon_standing_knee),
    Check::new(Slot::Joint(J::RightElbow), half_moon_lower_arm),
    Check::new(Slot::Joint(J::RightEar), half_moon_gaze),
    Check::new(Slot::Joint(J::LeftShoulder), half_moon_upper_shoulder),
    Check::new(Slot::Joint(J::LeftElbow), half_moon_upper_arm),
    Check::new(Slot::Joint(J::LeftHip), half_moon_raised_leg),
];

fn half_moon_standing_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 175.0, 185.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("將左腿伸直", 2).with_arrow(ctx.pull(L::RightKnee, -1.0, 0.0)))
    }
}

fn half_moon_lower_arm(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 150.0, 180.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("將左手伸直", 3).with_arrow(ctx.push(L::RightElbow, 0.0, 1.0)))
    }
}

fn half_moon_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    // 顔を上に向けるとカメラ側に見えるのは左耳
    if !ctx.visible(L::LeftEar) && !ctx.visible(L::Nose) {
        return Verdict::Skip;
    }
    if ctx.point(L::Nose).y < ctx.point(L::LeftEar).y {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請將頭轉向天花板", 4).with_arrow(ctx.push(L::Nose, 0.0, -1.0)))
    }
}

fn half_moon_upper_shoulder(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 85.0, 95.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("將右手高舉，並和身體呈90度", 5)
                .with_arrow(ctx.pull(L::LeftElbow, 0.0, 1.0)),
        )
    }
}

fn half_moon_upper_arm(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if band(angle, 150.0, 180.0) == Band::Within {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("將右手伸直", 3).with_arrow(ctx.push(L::LeftElbow, 0.0, -1.0)))
    }
}

fn half_moon_raised_leg(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 80.0, 105.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("將右腿抬高並平行於地面", 6).with_arrow(ctx.push(L::LeftKnee, 0.0, -1.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("將右腿放低並平行於地面", 7).with_arrow(ctx.push(L::LeftKnee, 0.0, 1.0)),
        ),
    }
}

// --- Chair ---

pub(super) const CHAIR: &[Check] = &[
    Check::new(Slot::Joint(J::LeftKnee), chair_left_knee),
    Check::new(Slot::Joint(J::RightKnee), chair_right_knee),
    Check::new(Slot::Joint(J::LeftElbow), chair_left_elbow),
    Check::new(Slot::Joint(J::RightElbow), chair_right_elbow),
    Check::new(Slot::Joint(J::RightHip), chair_hip),
    Check::new(Slot::Joint(J::RightShoulder), chair_arms_raised),
    Check::new(Slot::Joint(J::LeftEar), chair_gaze),
];

fn chair_left_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 100.0, 140.0) {
        Band::Within => Verdict::pass(),
        Band::Below => {
            let message = ctx.wording(
                "右腿膝蓋彎曲角度太小",
                "右腿膝蓋彎曲角度太小，請勿將重心偏右",
            );
            Verdict::fail(Guidance::new(message, 2).with_arrow(ctx.push(L::LeftKnee, -1.0, 0.0)))
        }
        Band::Above => {
            let message = ctx.wording(
                "右腿膝蓋彎曲角度太大",
                "右腿膝蓋彎曲角度太大，請勿將重心偏左",
            );
            Verdict::fail(Guidance::new(message, 3).with_arrow(ctx.push(L::LeftKnee, 1.0, 0.0)))
        }
    }
}

fn chair_right_knee(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 100.0, 140.0) {
        Band::Within => Verdict::pass(),
        Band::Below => {
            let message = ctx.wording(
                "左腿膝蓋彎曲角度太小",
                "左腿膝蓋彎曲角度太小，請勿將重心偏左",
            );
            Verdict::fail(Guidance::new(message, 4).with_arrow(ctx.push(L::RightKnee, -1.0, 0.0)))
        }
        Band::Above => {
            let message = ctx.wording(
                "左腿膝蓋彎曲角度太大",
                "左腿膝蓋彎曲角度太大，請勿將重心偏右",
            );
            Verdict::fail(Guidance::new(message, 5).with_arrow(ctx.push(L::RightKnee, 1.0, 0.0)))
        }
    }
}

fn chair_left_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請將右手伸直", 6).with_arrow(ctx.push(L::LeftElbow, 1.0, -1.0)))
    }
}

fn chair_right_elbow(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    if angle >= 150.0 {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請將左手伸直", 7).with_arrow(ctx.push(L::RightElbow, 1.0, -1.0)))
    }
}

fn chair_hip(ctx: &RuleContext<'_>, key: J) -> Verdict {
    let Some(angle) = ctx.angle(key) else { return Verdict::Skip };
    match band(angle, 65.0, 110.0) {
        Band::Within => Verdict::pass(),
        Band::Below => Verdict::fail(
            Guidance::new("左腿臀部彎曲角度太小", 8).with_arrow(ctx.push(L::RightHip, 1.0, 0.0)),
        ),
        Band::Above => Verdict::fail(
            Guidance::new("左腿臀部彎曲角度太大", 9).with_arrow(ctx.push(L::RightHip, -1.0, 0.0)),
        ),
    }
}

fn chair_arms_raised(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if !ctx.visible(L::RightShoulder) && !ctx.visible(L::RightElbow) && !ctx.visible(L::LeftShoulder)
    {
        return Verdict::Skip;
    }
    let elbow_y = ctx.point(L::RightElbow).y;
    if ctx.point(L::RightShoulder).y - elbow_y > 0.05 && ctx.point(L::LeftShoulder).y - elbow_y > 0.05
    {
        Verdict::pass()
    } else {
        Verdict::fail(
            Guidance::new("請將雙手舉起，手肘接近頭部", 10)
                .with_arrow(ctx.push(L::RightElbow, 0.0, -1.0)),
        )
    }
}

fn chair_gaze(ctx: &RuleContext<'_>, _key: J) -> Verdict {
    if ctx.point(L::LeftEar).x < ctx.point(L::Nose).x {
        Verdict::pass()
    } else {
        Verdict::fail(Guidance::new("請目視前方", 11).with_arrow(ctx.push(L::Nose, 1.0, 0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{assert_arrow, Frame};
    use super::super::Outcome;
    use crate::catalog::PoseKind;
    use crate::config::FeedbackVariant;
    use crate::pose::{BodyLandmark as L, JointKey as J};

    fn mountain_upright() -> Frame {
        Frame::new()
            .at(L::Nose, 0.5, 0.1)
            .at(L::LeftEye, 0.55, 0.08)
            .at(L::RightEye, 0.45, 0.08)
            .at(L::LeftHip, 0.6, 0.6)
            .at(L::RightHip, 0.4, 0.6)
            .at(L::LeftAnkle, 0.6, 1.0)
            .at(L::RightAnkle, 0.4, 1.0)
            .angle(J::LeftShoulder, 90.0)
            .angle(J::RightShoulder, 90.0)
            .angle(J::LeftElbow, 175.0)
            .angle(J::RightElbow, 175.0)
            .angle(J::LeftHip, 178.0)
            .angle(J::RightHip, 178.0)
            .angle(J::LeftKnee, 178.0)
            .angle(J::RightKnee, 178.0)
    }

    #[test]
    fn test_mountain_all_pass() {
        let out = mountain_upright().run(PoseKind::Mountain);
        assert!(out.guidance.is_none());
        assert!(out.verdicts.all_true());
        assert_eq!(out.outcome, Outcome::Correct);
    }

    #[test]
    fn test_mountain_head_turned_points_from_far_eye() {
        let out = mountain_upright().at(L::Nose, 0.7, 0.1).run(PoseKind::Mountain);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "請將頭面向正前方");
        assert_eq!(g.image, Some(2));
        assert_arrow(g.arrow, [0.70, 0.08, 0.55, 0.08]);
        assert_eq!(out.verdicts.get(J::Nose), Some(false));
        assert!(out.verdicts.iter().filter(|(k, _)| *k != J::Nose).all(|(_, v)| v));
    }

    #[test]
    fn test_mountain_hidden_ankle_aborts() {
        let out = mountain_upright().hidden(L::RightAnkle).run(PoseKind::Mountain);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "請確保腳踝能被檢測到");
        assert_eq!(out.verdicts.get(J::LeftAnkle), Some(false));
        assert_eq!(out.verdicts.get(J::RightAnkle), Some(false));
        assert_eq!(out.outcome, Outcome::Guidance);
    }

    #[test]
    fn test_mountain_uneven_feet_use_vertical_gap() {
        let out = mountain_upright().at(L::LeftAnkle, 0.6, 0.9).run(PoseKind::Mountain);
        assert_eq!(out.guidance.unwrap().message, "請將雙腳平行站立於地面");
    }

    #[test]
    fn test_mountain_undetermined_angle_is_skipped() {
        let out = mountain_upright()
            .undetermined(J::LeftElbow)
            .run(PoseKind::Mountain);
        assert!(out.guidance.is_none());
        assert_eq!(out.verdicts.get(J::LeftElbow), Some(false));
        assert_eq!(out.verdicts.get(J::RightElbow), Some(true));
    }

    #[test]
    fn test_tree_all_pass() {
        let out = Frame::new()
            .at(L::RightKnee, 0.45, 0.7)
            .at(L::LeftFootIndex, 0.5, 0.55)
            .at(L::LeftShoulder, 0.6, 0.3)
            .at(L::RightShoulder, 0.4, 0.3)
            .at(L::LeftIndex, 0.5, 0.0)
            .at(L::RightIndex, 0.5, 0.0)
            .angle(J::RightKnee, 175.0)
            .angle(J::LeftKnee, 50.0)
            .angle(J::LeftHip, 120.0)
            .angle(J::LeftShoulder, 170.0)
            .angle(J::RightShoulder, 170.0)
            .angle(J::LeftElbow, 160.0)
            .angle(J::RightElbow, 160.0)
            .sample(J::LeftElbow, 165.0)
            .sample(J::RightElbow, 165.0)
            .run(PoseKind::Tree);
        assert!(out.guidance.is_none());
        assert!(out.verdicts.all_true());
        assert_eq!(out.outcome, Outcome::Correct);
    }

    #[test]
    fn test_tree_right_knee_under_bent() {
        let out = Frame::new()
            .at(L::RightKnee, 0.4, 0.8)
            .angle(J::RightKnee, 150.0)
            .run(PoseKind::Tree);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "將左腳打直平均分配雙腳重量，勿將右腳重量全放在左腳大腿");
        assert_eq!(g.image, Some(1));
        assert_arrow(g.arrow, [0.4, 0.8, 0.4, 0.95]);
    }

    #[test]
    fn test_tree_elbow_needs_sample() {
        let frame = Frame::new().angle(J::LeftElbow, 120.0);
        assert!(frame.run(PoseKind::Tree).guidance.is_none());

        let frame = frame.sample(J::LeftElbow, 170.0);
        let g = frame.run(PoseKind::Tree).guidance.unwrap();
        assert_eq!(g.message, "請將雙手再往上伸展，使手軸貼近耳朵");
        assert_eq!(g.image, Some(5));
    }

    #[test]
    fn test_tree_hands_left_of_body() {
        let frame = Frame::new()
            .at(L::LeftShoulder, 0.6, 0.3)
            .at(L::RightShoulder, 0.4, 0.3)
            .at(L::LeftIndex, 0.5, 0.0)
            .at(L::RightIndex, 0.3, 0.0);
        let out = frame.run(PoseKind::Tree);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "請將雙手往右移動，保持在頭頂正上方");
        assert_eq!(out.verdicts.get(J::LeftIndex), Some(true));
        assert_eq!(out.verdicts.get(J::RightIndex), Some(false));
    }

    fn warrior_lunge() -> Frame {
        Frame::new()
            .at(L::LeftHip, 0.6, 0.5)
            .at(L::RightHip, 0.4, 0.5)
            .at(L::LeftKnee, 0.75, 0.7)
            .at(L::LeftAnkle, 0.75, 0.9)
            .at(L::Nose, 0.7, 0.1)
            .angle(J::LeftKnee, 120.0)
            .angle(J::RightKnee, 175.0)
            .angle(J::LeftHip, 120.0)
            .angle(J::RightHip, 120.0)
            .angle(J::LeftShoulder, 170.0)
            .angle(J::RightShoulder, 170.0)
            .angle(J::LeftElbow, 175.0)
            .angle(J::RightElbow, 175.0)
    }

    #[test]
    fn test_warrior_all_pass() {
        let out = warrior_lunge().run(PoseKind::WarriorII);
        assert!(out.guidance.is_none());
        assert!(out.verdicts.all_true());
        assert_eq!(out.outcome, Outcome::Correct);
    }

    #[test]
    fn test_warrior_gaze_away_from_front_leg() {
        let out = warrior_lunge().at(L::Nose, 0.35, 0.1).run(PoseKind::WarriorII);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "請將頭轉向彎曲腳的方向並直視前方");
        assert_eq!(g.image, Some(5));
        assert_arrow(g.arrow, [0.35, 0.1, 0.5, 0.1]);
        assert_eq!(out.verdicts.get(J::Nose), Some(false));
        assert_eq!(out.verdicts.get(J::LeftElbow), Some(true));
    }

    #[test]
    fn test_warrior_wording_variants() {
        let frame = Frame::new()
            .at(L::LeftKnee, 0.3, 0.7)
            .at(L::LeftAnkle, 0.1, 0.9)
            .angle(J::LeftKnee, 120.0);
        assert_eq!(
            frame.message(PoseKind::WarriorII).unwrap(),
            "請將重心往右移動移動，並且小腿與地面保持垂直"
        );
        let frame = frame.variant(FeedbackVariant::Concise);
        assert_eq!(
            frame.message(PoseKind::WarriorII).unwrap(),
            "請將身體下壓，右腳再彎曲一些"
        );
    }

    #[test]
    fn test_warrior_front_foot_before_knee() {
        let frame = Frame::new()
            .at(L::LeftHip, 0.5, 0.5)
            .at(L::LeftKnee, 0.4, 0.7)
            .angle(J::LeftKnee, 60.0);
        let out = frame.run(PoseKind::WarriorII);
        assert_eq!(out.guidance.unwrap().message, "請將右腳腳尖朝向右手邊");
        assert_eq!(out.verdicts.get(J::LeftKnee), Some(false));
    }

    fn triangle_reach() -> Frame {
        Frame::new()
            .at(L::RightFootIndex, 0.2, 0.95)
            .at(L::RightHeel, 0.25, 0.95)
            .at(L::LeftWrist, 0.7, 0.1)
            .at(L::LeftElbow, 0.7, 0.2)
            .at(L::RightElbow, 0.3, 0.6)
            .at(L::RightWrist, 0.3, 0.8)
            .at(L::Nose, 0.45, 0.5)
            .at(L::RightEye, 0.44, 0.52)
            .angle(J::LeftHip, 70.0)
            .angle(J::LeftShoulder, 160.0)
            .angle(J::RightShoulder, 150.0)
            .angle(J::RightHip, 90.0)
            .angle(J::LeftElbow, 170.0)
            .angle(J::RightElbow, 170.0)
            .angle(J::RightKnee, 170.0)
            .angle(J::LeftKnee, 170.0)
    }

    #[test]
    fn test_triangle_all_pass() {
        let out = triangle_reach().run(PoseKind::Triangle);
        assert!(out.guidance.is_none());
        assert!(out.verdicts.all_true());
        assert_eq!(out.outcome, Outcome::Correct);
    }

    #[test]
    fn test_triangle_front_foot_turned() {
        let out = triangle_reach()
            .at(L::RightFootIndex, 0.3, 0.95)
            .run(PoseKind::Triangle);
        let g = out.guidance.unwrap();
        assert_eq!(g.message, "請確認是否已經將左腳向左轉");
        assert_eq!(g.image, Some(5));
        assert_arrow(g.arrow, [0.3, 0.95, 0.15, 0.95]);
        assert_eq!(out.verdicts.get(J::RightFootIndex), Some(false));
        assert_eq!(out.verdicts.get(J::LeftKnee), Some(true));
    }

    #[test]
    fn test_triangle_hidden_foot_is_notice_only() {
        let out = Frame::new()
            .hidden(L::RightFootIndex)
            .at(L::Nose, 0.5, 0.1)
            .at(L::RightEye, 0.5, 0.2)
            .run(PoseKind::Triangle);
        assert_eq!(out.guidance.unwrap().message, "請確認腳踝是否位於鏡頭範圍之內");
        assert_eq!(out.verdicts.get(J::RightFootIndex), Some(false));
        assert_eq!(out.outcome, Outcome::Guidance);
    }

    #[test]
    fn test_half_moon_all_pass() {
        let out = Frame::new()
            .at(L::Nose, 0.5, 0.3)
            .at(L::LeftEar, 0.5, 0.35)
            .angle(J::RightKnee, 180.0)
            .angle(J::RightElbow, 165.0)
            .angle(J::LeftShoulder, 90.0)
            .angle(J::LeftElbow, 170.0)
            .angle(J::LeftHip, 95.0)
            .run(PoseKind::HalfMoon);
        assert!(out.guidance.is_none());
        assert!(out.verdicts.all_true());
        assert_eq!(out.outcome, Outcome::Correct);
    }

    #[test]
    fn test_half_moon_gaze_uses_left_ear() {
        let frame = Frame::new().at(L::Nose, 0.5, 0.4).at(L::LeftEar, 0.5, 0.3);
        let out = frame.run(PoseKind::HalfMoon);
        assert_eq!(out.guidance.unwrap().message, "請將頭轉向天花板");
        assert_eq!(out.verdicts.get(J::RightEar), Some(false));
    }

    #[test]
    fn test_chair_all_pass() {
        let out = Frame::new()
            .at(L::RightShoulder, 0.4, 0.4)
            .at(L::LeftShoulder, 0.6, 0.4)
            .at(L::RightElbow, 0.4, 0.2)
            .at(L::LeftEar, 0.5, 0.1)
            .at(L::Nose, 0.55, 0.1)
            .angle(J::LeftKnee, 120.0)
            .angle(J::RightKnee, 120.0)
            .angle(J::LeftElbow, 170.0)
            .angle(J::RightElbow, 170.0)
            .angle(J::RightHip, 90.0)
            .run(PoseKind::Chair);
        assert!(out.guidance.is_none());
        assert!(out.verdicts.all_true());
        assert_eq!(out.outcome, Outcome::Correct);
    }

    #[test]
    fn test_chair_knee_bands() {
        let frame = Frame::new().angle(J::LeftKnee, 150.0);
        assert_eq!(
            frame.message(PoseKind::Chair).unwrap(),
            "右腿膝蓋彎曲角度太大，請勿將重心偏左"
        );
        let frame = Frame::new()
            .angle(J::RightKnee, 90.0)
            .variant(FeedbackVariant::Concise);
        let g = frame.run(PoseKind::Chair).guidance.unwrap();
        assert_eq!(g.message, "左腿膝蓋彎曲角度太小");
        assert_eq!(g.image, Some(4));
    }
}
