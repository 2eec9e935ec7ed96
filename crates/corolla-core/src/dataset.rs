//! Built-in reference dataset: five scoring categories with four to six items each.

use crate::hierarchy::Node;

pub const REFERENCE_ROOT_NAME: &str = "ABITDA";

fn category(name: &str, items: &[&str]) -> Node {
    Node::branch(name, items.iter().map(|item| Node::leaf(*item)).collect())
}

pub fn reference_hierarchy() -> Node {
    Node::branch(
        REFERENCE_ROOT_NAME,
        vec![
            category(
                "Business Impact",
                &[
                    "Expenditure",
                    "Revenue Growth",
                    "Customer Satisfaction",
                    "Cost Savings",
                    "Market Positioning",
                    "Talent",
                ],
            ),
            category(
                "Innovation",
                &[
                    "Innovation Inputs",
                    "Innovation Process",
                    "Innovation Outputs",
                    "Innovation Outcomes",
                ],
            ),
            category(
                "Talent",
                &[
                    "Talent Acquisition",
                    "Talent Development",
                    "Employee Engagement",
                    "Retention",
                    "Talent Productivity",
                ],
            ),
            category(
                "Delivery",
                &[
                    "Time to market",
                    "Efficiency",
                    "Quality",
                    "Customer Quality",
                    "Resource Utilization",
                ],
            ),
            category(
                "Alignment",
                &[
                    "Goal Clarity",
                    "Communications",
                    "Cross-functional collaboration",
                    "Customer Feedback",
                    "Product Strategy",
                ],
            ),
        ],
    )
}
