//! Light-themed technical guide.

use genpdf::style::Color;

use crate::content::{Content, ContentBuilder};
use crate::decoration::DecorationPlan;
use crate::error::StyleError;
use crate::render::PageSetup;
use crate::style::{rgb, FontKind, StyleSheet, TextAlign};

pub const TITLE: &str = "TaskBoard Technical Documentation";
pub const DEFAULT_OUTPUT: &str = "TaskBoard_Guide.pdf";

const ACCENT_PRIMARY: Color = rgb(0x7c3aed);
const ACCENT_SECONDARY: Color = rgb(0x06b6d4);
const TEXT_PRIMARY: Color = rgb(0x1a1a2e);
const TEXT_SECONDARY: Color = rgb(0x6b7280);
const CODE_TEXT: Color = rgb(0x374151);
const CODE_BACKGROUND: Color = rgb(0xf3f4f6);

const BULLET: &str = "• ";

/// Letter with three-quarter-inch margins.
pub fn page_setup() -> PageSetup {
    PageSetup::letter().with_uniform_margin(54.0)
}

pub fn style_sheet() -> Result<StyleSheet, StyleError> {
    let mut sheet = StyleSheet::with_base_styles();
    sheet.derive("DocTitle", "Title", |style| {
        style
            .with_size(28)
            .with_color(ACCENT_PRIMARY)
            .with_align(TextAlign::Center)
            .with_space_after(20.0)
    })?;
    sheet.derive("DocSubtitle", "Normal", |style| {
        style
            .with_size(14)
            .with_color(TEXT_SECONDARY)
            .with_align(TextAlign::Center)
            .with_space_after(30.0)
    })?;
    sheet.derive("SectionHeader", "Heading1", |style| {
        style
            .with_size(20)
            .with_color(ACCENT_PRIMARY)
            .with_space_before(25.0)
            .with_space_after(15.0)
    })?;
    sheet.derive("SubsectionHeader", "Heading2", |style| {
        style
            .bold()
            .with_size(14)
            .with_color(ACCENT_SECONDARY)
            .with_space_before(15.0)
            .with_space_after(10.0)
    })?;
    sheet.derive("DocBody", "Normal", |style| {
        style
            .with_size(11)
            .with_leading(16.0)
            .with_color(TEXT_PRIMARY)
            .with_space_after(10.0)
    })?;
    sheet.derive("DocList", "Normal", |style| {
        style
            .with_size(11)
            .with_leading(14.0)
            .with_color(TEXT_PRIMARY)
            .with_indent(20.0, 0.0)
            .with_space_after(6.0)
    })?;
    sheet.derive("DocCode", "Normal", |style| {
        style
            .with_font(FontKind::Mono)
            .with_size(9)
            .with_leading(12.0)
            .with_color(CODE_TEXT)
            .with_background(CODE_BACKGROUND)
            .with_indent(10.0, 10.0)
            .with_space_before(5.0)
            .with_space_after(5.0)
    })?;
    Ok(sheet)
}

/// The guide prints no page chrome at all.
pub fn decoration_plan() -> DecorationPlan {
    DecorationPlan::plain()
}

const CONTENTS: &[&str] = &[
    "1. Overview",
    "2. Architecture",
    "3. Task Lifecycle",
    "4. Robot SDK",
    "5. Verification System",
    "6. Protocol Economics",
    "7. Technology Stack",
    "8. Roadmap",
    "9. Core Values",
];

const CHALLENGES: &[&str] = &[
    "<b>Fragmented Access:</b> Currently, businesses must negotiate individually with robot manufacturers or service providers. TaskBoard creates a unified marketplace.",
    "<b>Trust Issues:</b> Without blockchain verification, there's no trustless way to confirm task completion. Our cryptographic proof system solves this.",
    "<b>Payment Friction:</b> Traditional invoicing and payment cycles slow down the industry. Smart contract escrow enables instant, automated settlement.",
    "<b>Underutilized Assets:</b> Many robots sit idle between tasks. TaskBoard enables efficient resource allocation across a global network.",
];

const LAYERS: &[(&str, &str, &[&str])] = &[
    (
        "Protocol Layer",
        "Solana smart contracts (programs) handling:",
        &[
            "Task creation and management",
            "Escrow account creation",
            "Bid matching and acceptance",
            "Payment release logic",
            "Dispute resolution",
        ],
    ),
    (
        "Robot SDK Layer",
        "Integration libraries for robot manufacturers:",
        &[
            "Task discovery and bidding APIs",
            "Telemetry streaming",
            "Proof generation utilities",
            "Wallet management",
        ],
    ),
    (
        "Verification Layer",
        "Distributed network of validators who:",
        &[
            "Monitor task execution telemetry",
            "Verify completion proofs",
            "Reach consensus on outcomes",
            "Earn fees for honest participation",
        ],
    ),
];

enum Step {
    List(&'static str, &'static [&'static str]),
    Text(&'static str),
}

const LIFECYCLE: &[(&str, Step)] = &[
    (
        "1. Task Creation",
        Step::List(
            "Requester defines task parameters:",
            &[
                "Type (delivery, patrol, inspection, etc.)",
                "Location and geographic constraints",
                "Time requirements and deadlines",
                "Payment amount in SOL or USDC",
                "Required robot capabilities",
            ],
        ),
    ),
    (
        "2. Escrow Deposit",
        Step::Text("Payment is locked in a program-derived account (PDA). Funds cannot be accessed until task completion or cancellation conditions are met."),
    ),
    (
        "3. Bidding Phase",
        Step::List(
            "Qualified robots submit bids including:",
            &[
                "Estimated completion time",
                "Operator reputation score",
                "Equipment specifications",
                "Any discounts offered",
            ],
        ),
    ),
    (
        "4. Matching & Assignment",
        Step::Text("Either automatic (lowest bid) or manual selection by requester. Assignment creates binding agreement on-chain."),
    ),
    (
        "5. Execution",
        Step::Text("Robot performs task while streaming telemetry to verification network. SDK handles proof generation."),
    ),
    (
        "6. Verification",
        Step::Text("Validators review execution data, vote on completion status. Supermajority (66%+) required for approval."),
    ),
    (
        "7. Settlement",
        Step::Text("On approval: escrow releases to robot operator (minus protocol fees). On rejection: funds return to requester, dispute process available."),
    ),
];

const SDK_SNIPPETS: &[(&str, &[&str])] = &[
    (
        "Initialization",
        &[
            "import { TaskBoardClient } from '@taskboard/robot-sdk';",
            "",
            "const client = new TaskBoardClient({",
            "  cluster: 'mainnet-beta',",
            "  wallet: operatorWallet,",
            "  robotId: 'robot_abc123'",
            "});",
        ],
    ),
    (
        "Discovering Tasks",
        &[
            "const tasks = await client.getTasks({",
            "  type: ['delivery', 'patrol'],",
            "  maxDistance: 50, // km",
            "  minPayment: 10   // USDC",
            "});",
        ],
    ),
    (
        "Submitting Bids",
        &[
            "await client.submitBid({",
            "  taskId: 'task_xyz',",
            "  estimatedTime: 3600, // seconds",
            "  message: 'Available immediately'",
            "});",
        ],
    ),
    (
        "Streaming Telemetry",
        &[
            "client.startTelemetry({",
            "  taskId: 'task_xyz',",
            "  interval: 1000, // ms",
            "  sensors: ['gps', 'camera', 'lidar']",
            "});",
        ],
    ),
    (
        "Completing Tasks",
        &[
            "const proof = await client.generateProof('task_xyz');",
            "await client.submitCompletion(proof);",
        ],
    ),
];

const PROOF_MECHANISMS: &[&str] = &[
    "<b>GPS Trails:</b> Continuous location data showing robot movement patterns",
    "<b>Photo Evidence:</b> Time-stamped images at key checkpoints",
    "<b>Sensor Signatures:</b> LiDAR/depth data confirming physical interactions",
    "<b>Third-Party Oracles:</b> Integration with IoT devices at task locations",
];

const VALIDATOR_REQUIREMENTS: &[&str] = &[
    "Stake minimum 1000 USDC equivalent",
    "Maintain 99%+ uptime",
    "Process verifications within SLA",
    "Honest participation (slashing for fraud)",
];

const CONSENSUS_STEPS: &[&str] = &[
    "Task completion proof submitted",
    "Random validator selection (stake-weighted)",
    "Independent evaluation period (30 min)",
    "Votes submitted to consensus contract",
    "66%+ agreement triggers outcome",
    "Rewards distributed to honest validators",
];

const DISPUTE_STEPS: &[&str] = &[
    "Extended evidence submission period",
    "DAO governance vote",
    "Final binding decision",
    "Potential slashing of bad actors",
];

const ECONOMICS: &[(Option<&str>, &str, &[&str])] = &[
    (
        Some("Fee Structure"),
        "<b>Protocol Fee: 2.5% of task value</b>",
        &[
            "Treasury: 1.5% (development, grants)",
            "Validators: 0.75% (distributed by stake)",
            "Insurance Pool: 0.25% (dispute resolution)",
        ],
    ),
    (
        None,
        "<b>Gas Costs: ~0.00025 SOL per transaction</b>",
        &[
            "Task creation: 1 transaction",
            "Bid submission: 1 transaction",
            "Completion: 2-3 transactions",
        ],
    ),
    (
        Some("Payment Options"),
        "Supported currencies:",
        &["SOL (native)", "USDC (SPL token)", "Future: Additional stablecoins"],
    ),
    (
        Some("Staking Mechanics"),
        "Robot operators stake tokens to:",
        &[
            "Signal reliability and commitment",
            "Increase matching priority",
            "Enable higher-value task access",
            "Earn staking rewards",
        ],
    ),
    (
        None,
        "Slash conditions:",
        &[
            "Task abandonment: 10% stake",
            "Fraudulent completion: 50% stake",
            "Repeated failures: Progressive penalties",
        ],
    ),
    (
        Some("Future Tokenomics"),
        "Governance token planned for:",
        &[
            "Protocol parameter voting",
            "Fee adjustment proposals",
            "Treasury allocation decisions",
            "Validator set management",
        ],
    ),
];

const TECHNOLOGY: &[(&str, &[(&str, &str)])] = &[
    (
        "Blockchain",
        &[
            ("Solana", "Mainnet-beta"),
            ("Anchor", "0.29.0"),
            ("SPL Token", "Standard"),
            ("Metaplex", "NFT Support"),
        ],
    ),
    (
        "Frontend",
        &[
            ("React", "18.2.0"),
            ("TypeScript", "5.0+"),
            ("Framer Motion", "10.x"),
            ("Vite", "5.x"),
        ],
    ),
    (
        "Robot SDK",
        &[
            ("ROS2", "Humble"),
            ("gRPC", "Streaming"),
            ("WebSocket", "Real-time"),
            ("MQTT", "Telemetry"),
        ],
    ),
    (
        "Infrastructure",
        &[
            ("IPFS", "Storage"),
            ("Chainlink", "Oracles"),
            ("Redis", "Cache"),
            ("PostgreSQL", "Index"),
        ],
    ),
];

const ROADMAP: &[(&str, &[&str])] = &[
    (
        "Phase 1: Foundation (Current)",
        &[
            "Core smart contract development",
            "Robot SDK alpha release",
            "Task posting interface",
            "Initial security audits",
        ],
    ),
    (
        "Phase 2: Expansion (Upcoming)",
        &[
            "Multi-robot task support",
            "Advanced verification oracles",
            "Mobile operator app",
            "Partnership integrations",
        ],
    ),
    (
        "Phase 3: Scale (Future)",
        &[
            "Cross-chain compatibility",
            "AI task optimization",
            "Enterprise solutions",
            "Global robot network",
        ],
    ),
];

const CORE_VALUES: &[(&str, &str)] = &[
    ("Decentralization", "No central authority controls the marketplace. Smart contracts ensure trustless transactions between task posters and robot operators."),
    ("Transparency", "All transactions, robot performance metrics, and task completions are recorded on the Solana blockchain for public verification."),
    ("Efficiency", "Automated matching algorithms connect tasks with the most suitable robots, minimizing downtime and maximizing throughput."),
    ("Security", "Escrow-based payments, multi-signature verification, and on-chain dispute resolution protect all parties involved."),
];

fn bullets(builder: &mut ContentBuilder<'_>, items: &[&str]) -> Result<(), StyleError> {
    builder.bullets("DocList", BULLET, items.iter().copied())?;
    Ok(())
}

/// Code listings keep their line structure through `<br/>` breaks.
fn code(builder: &mut ContentBuilder<'_>, lines: &[&str]) -> Result<(), StyleError> {
    builder.paragraph("DocCode", lines.join("<br/>"))?;
    Ok(())
}

pub fn content(sheet: &StyleSheet) -> Result<Content, StyleError> {
    let mut b = ContentBuilder::new(sheet);

    b.spacer(144.0)?
        .paragraph("DocTitle", "TaskBoard")?
        .paragraph("DocSubtitle", "Robot-as-a-Service Protocol")?
        .spacer(36.0)?
        .paragraph("DocSubtitle", "Technical Documentation")?
        .spacer(72.0)?
        .paragraph("DocBody", "The Decentralized Robot Marketplace")?
        .paragraph("DocBody", "Built on Solana")?
        .spacer(36.0)?
        .paragraph("DocBody", "Version 1.0 | December 2024")?
        .page_break()?;

    b.paragraph("SectionHeader", "Table of Contents")?.spacer(20.0)?;
    for entry in CONTENTS {
        b.paragraph("DocBody", *entry)?;
    }
    b.page_break()?;

    b.section(
        "SectionHeader",
        "1. Overview",
        "DocBody",
        "TaskBoard is a decentralized protocol for Robot-as-a-Service (RaaS) built on Solana. It creates a trustless marketplace where businesses can hire autonomous robots for various tasks, with smart contracts handling payment escrow and verification.",
    )?
    .paragraph("DocBody", "The protocol addresses key challenges in the robotics industry:")?;
    bullets(&mut b, CHALLENGES)?;
    b.page_break()?;

    b.section(
        "SectionHeader",
        "2. Architecture",
        "DocBody",
        "The TaskBoard protocol consists of four primary layers:",
    )?
    .paragraph("SubsectionHeader", "Frontend Layer")?
    .paragraph("DocBody", "React-based web application providing interfaces for task requesters and robot operators. Features real-time updates via WebSocket connections.")?;
    for (title, intro, items) in LAYERS {
        b.paragraph("SubsectionHeader", *title)?
            .paragraph("DocBody", *intro)?;
        bullets(&mut b, items)?;
    }
    b.page_break()?;

    b.section(
        "SectionHeader",
        "3. Task Lifecycle",
        "DocBody",
        "Every task on TaskBoard follows a standardized lifecycle:",
    )?;
    for (title, step) in LIFECYCLE {
        b.paragraph("SubsectionHeader", *title)?;
        match step {
            Step::List(intro, items) => {
                b.paragraph("DocBody", *intro)?;
                bullets(&mut b, items)?;
            }
            Step::Text(text) => {
                b.paragraph("DocBody", *text)?;
            }
        }
    }
    b.page_break()?;

    b.section(
        "SectionHeader",
        "4. Robot SDK",
        "DocBody",
        "The TaskBoard SDK enables robot integration with minimal code changes.",
    )?
    .paragraph("SubsectionHeader", "Installation")?
    .paragraph("DocCode", "npm install @taskboard/robot-sdk")?
    .paragraph("DocCode", "# or")?
    .paragraph("DocCode", "cargo add taskboard-sdk")?;
    for (title, lines) in SDK_SNIPPETS {
        b.paragraph("SubsectionHeader", *title)?;
        code(&mut b, lines)?;
    }
    b.page_break()?;

    b.section(
        "SectionHeader",
        "5. Verification System",
        "DocBody",
        "The verification layer ensures honest task completion without centralized authorities.",
    )?
    .paragraph("SubsectionHeader", "Proof Types")?
    .paragraph("DocBody", "TaskBoard supports multiple proof mechanisms:")?;
    bullets(&mut b, PROOF_MECHANISMS)?;
    b.paragraph("SubsectionHeader", "Validator Requirements")?
        .paragraph("DocBody", "To become a validator:")?;
    bullets(&mut b, VALIDATOR_REQUIREMENTS)?;
    b.paragraph("SubsectionHeader", "Consensus Mechanism")?
        .numbered("DocList", CONSENSUS_STEPS.iter().copied())?
        .paragraph("SubsectionHeader", "Dispute Resolution")?
        .paragraph("DocBody", "If consensus fails or party disputes:")?
        .numbered("DocList", DISPUTE_STEPS.iter().copied())?
        .page_break()?;

    b.section(
        "SectionHeader",
        "6. Protocol Economics",
        "DocBody",
        "TaskBoard's economic model aligns incentives across all participants.",
    )?;
    for (title, intro, items) in ECONOMICS {
        if let Some(title) = title {
            b.paragraph("SubsectionHeader", *title)?;
        }
        b.paragraph("DocBody", *intro)?;
        bullets(&mut b, items)?;
    }
    b.page_break()?;

    b.section(
        "SectionHeader",
        "7. Technology Stack",
        "DocBody",
        "Built on proven, scalable infrastructure.",
    )?;
    for (layer, components) in TECHNOLOGY {
        b.paragraph("SubsectionHeader", *layer)?.bullets(
            "DocList",
            BULLET,
            components
                .iter()
                .map(|(component, version)| format!("{}: {}", component, version)),
        )?;
    }
    b.page_break()?;

    b.section(
        "SectionHeader",
        "8. Roadmap",
        "DocBody",
        "Our path to a decentralized robotic future.",
    )?;
    for (phase, items) in ROADMAP {
        b.paragraph("SubsectionHeader", *phase)?;
        bullets(&mut b, items)?;
    }
    b.page_break()?;

    b.heading("SectionHeader", "9. Core Values")?;
    for (title, body) in CORE_VALUES {
        b.paragraph("SubsectionHeader", *title)?
            .paragraph("DocBody", *body)?;
    }
    b.spacer(72.0)?
        .paragraph("DocBody", "—".repeat(40))?
        .spacer(18.0)?
        .paragraph("DocSubtitle", "TaskBoard Protocol | Built on Solana | 2025")?
        .paragraph("DocBody", "For more information, visit the documentation at the TaskBoard website.")?;

    Ok(b.finish())
}
