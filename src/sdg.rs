pub const SDG_COUNT: u8 = 17;

const GOAL_NAMES: [&str; SDG_COUNT as usize] = [
    "No Poverty",
    "Zero Hunger",
    "Good Health and Well-being",
    "Quality Education",
    "Gender Equality",
    "Clean Water and Sanitation",
    "Affordable and Clean Energy",
    "Decent Work and Economic Growth",
    "Industry, Innovation and Infrastructure",
    "Reduced Inequalities",
    "Sustainable Cities and Communities",
    "Responsible Consumption and Production",
    "Climate Action",
    "Life Below Water",
    "Life on Land",
    "Peace, Justice and Strong Institutions",
    "Partnerships for the Goals",
];

pub fn is_valid_goal(goal: u8) -> bool {
    (1..=SDG_COUNT).contains(&goal)
}

pub fn goal_name(goal: u8) -> &'static str {
    if is_valid_goal(goal) {
        GOAL_NAMES[(goal - 1) as usize]
    } else {
        "Unknown goal"
    }
}

pub fn all_goals() -> impl Iterator<Item = u8> {
    1..=SDG_COUNT
}
