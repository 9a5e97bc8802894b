//! Built-in financial-literacy catalog.
//!
//! Five categories with seven questions each (three easy, two medium, two hard).

use crate::model::{CategoryConfig, CategoryKey, Difficulty, Question};

use CategoryKey::{Budgeting, CrisisPlanning, Debt, Investing, Saving};

const EASY: Difficulty = Difficulty::EASY;
const MEDIUM: Difficulty = Difficulty::MEDIUM;
const HARD: Difficulty = Difficulty::HARD;

pub const STANDARD_CATEGORIES: [CategoryConfig; 5] = [
    CategoryConfig::new(Budgeting, "Budgeting & cash flow", 1.2, MEDIUM, 5),
    CategoryConfig::new(Debt, "Debt & credit", 1.1, MEDIUM, 5),
    CategoryConfig::new(Saving, "Saving & emergency fund", 1.0, MEDIUM, 5),
    CategoryConfig::new(Investing, "Investing basics", 0.9, MEDIUM, 5),
    CategoryConfig::new(CrisisPlanning, "Crisis planning", 0.8, MEDIUM, 5),
];

pub static STANDARD_QUESTIONS: [Question; 35] = [
    // Budgeting
    Question::new(
        101,
        Budgeting,
        EASY,
        "What is the first step in building a monthly budget?",
        [
            "Opening a new credit card",
            "Listing your monthly income after tax",
            "Cancelling every subscription",
            "Buying budgeting software",
        ],
        1,
        "A budget starts from what actually arrives in your account each month.",
        None,
    ),
    Question::new(
        102,
        Budgeting,
        EASY,
        "Which of these is usually a fixed expense?",
        ["Groceries", "Restaurant meals", "Rent", "Clothing"],
        2,
        "Fixed expenses stay the same every month, like rent or a loan installment.",
        None,
    ),
    Question::new(
        103,
        Budgeting,
        EASY,
        "If you spend more than you earn each month, what happens over time?",
        [
            "Your savings grow",
            "Nothing changes",
            "Your bank covers it for free",
            "You build up debt or drain savings",
        ],
        3,
        "A persistent deficit has to be financed somewhere: savings or borrowing.",
        None,
    ),
    Question::new(
        104,
        Budgeting,
        MEDIUM,
        "In the 50/30/20 rule, what does the 20% stand for?",
        [
            "Saving and paying down debt",
            "Housing",
            "Entertainment",
            "Taxes",
        ],
        0,
        "50% needs, 30% wants, 20% savings and extra debt repayment.",
        Some("The split is a starting point. High-cost cities often push the needs share higher."),
    ),
    Question::new(
        105,
        Budgeting,
        MEDIUM,
        "What is a sinking fund?",
        [
            "A fund that invests in shipping companies",
            "Money set aside monthly for a known future expense",
            "A loan with a falling interest rate",
            "An account that charges negative interest",
        ],
        1,
        "Sinking funds spread predictable large costs, like car insurance, over months.",
        None,
    ),
    Question::new(
        106,
        Budgeting,
        HARD,
        "Your net income rises 10% but your spending rises 15%. What happened to your savings rate?",
        [
            "It increased",
            "It stayed the same",
            "It decreased",
            "It cannot be determined without knowing taxes",
        ],
        2,
        "When spending grows faster than income, the share left over shrinks.",
        Some("This is lifestyle creep: raises absorbed by new spending instead of savings."),
    ),
    Question::new(
        107,
        Budgeting,
        HARD,
        "Which method assigns every unit of income a job until nothing is left unassigned?",
        [
            "Envelope budgeting with cash only",
            "Pay-yourself-first budgeting",
            "Reverse budgeting",
            "Zero-based budgeting",
        ],
        3,
        "Zero-based budgets end at zero: income minus all planned uses equals nothing.",
        None,
    ),
    // Debt & credit
    Question::new(
        201,
        Debt,
        EASY,
        "What does APR describe on a loan?",
        [
            "The yearly cost of borrowing",
            "The monthly minimum payment",
            "The maximum credit limit",
            "The bank's profit margin",
        ],
        0,
        "APR is the annual percentage rate, the yearly price of the borrowed money.",
        None,
    ),
    Question::new(
        202,
        Debt,
        EASY,
        "What happens if you pay only the minimum on a credit card?",
        [
            "The balance disappears after a year",
            "Interest keeps accruing on the rest of the balance",
            "The card is closed automatically",
            "Your credit limit doubles",
        ],
        1,
        "The unpaid balance keeps collecting interest month after month.",
        None,
    ),
    Question::new(
        203,
        Debt,
        EASY,
        "Which habit most helps a credit score?",
        [
            "Opening many cards at once",
            "Closing your oldest account",
            "Paying bills on time",
            "Checking your own score often",
        ],
        2,
        "Payment history is the single largest factor in most scoring models.",
        None,
    ),
    Question::new(
        204,
        Debt,
        MEDIUM,
        "The avalanche method of paying off debt targets which balance first?",
        [
            "The smallest balance",
            "The newest loan",
            "The loan with the longest term",
            "The highest interest rate",
        ],
        3,
        "Avalanche minimizes total interest by attacking the most expensive debt.",
        Some("The snowball method pays the smallest balance first for quicker wins."),
    ),
    Question::new(
        205,
        Debt,
        MEDIUM,
        "What is credit utilization?",
        [
            "The share of available credit you are using",
            "How many loans you have had",
            "The number of late payments",
            "Your income divided by rent",
        ],
        0,
        "Using a small share of your limits signals lower risk to lenders.",
        None,
    ),
    Question::new(
        206,
        Debt,
        HARD,
        "A loan with a low monthly payment but a longer term usually means what?",
        [
            "Lower total cost",
            "Higher total interest paid",
            "No interest at all",
            "A guaranteed better credit score",
        ],
        1,
        "Stretching the term lowers each payment but adds months of interest.",
        None,
    ),
    Question::new(
        207,
        Debt,
        HARD,
        "Consolidating debts into one loan is most useful when it does what?",
        [
            "Extends every term by ten years",
            "Adds a new credit card",
            "Lowers the overall interest rate without extending payoff much",
            "Removes the debt from your credit report",
        ],
        2,
        "Consolidation helps only if the combined rate and term actually cost less.",
        None,
    ),
    // Saving & emergency fund
    Question::new(
        301,
        Saving,
        EASY,
        "What is an emergency fund for?",
        [
            "Holiday shopping",
            "Unexpected costs like repairs or job loss",
            "Buying stocks on a dip",
            "Paying monthly rent in advance",
        ],
        1,
        "It is a cushion for the unplanned, so you do not need to borrow.",
        None,
    ),
    Question::new(
        302,
        Saving,
        EASY,
        "Where should an emergency fund usually be kept?",
        [
            "In a single stock",
            "In a locked retirement account",
            "In cryptocurrency",
            "In an easily accessible savings account",
        ],
        3,
        "Emergency money must be safe and reachable within a day or two.",
        None,
    ),
    Question::new(
        303,
        Saving,
        EASY,
        "What does \"pay yourself first\" mean?",
        [
            "Move money to savings as soon as income arrives",
            "Buy something nice every payday",
            "Pay your own salary before your employees",
            "Pay off the smallest bill first",
        ],
        0,
        "Saving before spending makes the saving automatic instead of leftover.",
        None,
    ),
    Question::new(
        304,
        Saving,
        MEDIUM,
        "How many months of essential expenses is a common emergency fund target?",
        ["One week", "Three to six months", "Five years", "Exactly one month"],
        1,
        "Three to six months of essentials covers most job searches and repairs.",
        Some("Freelancers and single-income households often aim for the upper end."),
    ),
    Question::new(
        305,
        Saving,
        MEDIUM,
        "You earn 2% interest while inflation is 4%. What happens to your savings?",
        [
            "They grow in real terms",
            "They stay exactly the same",
            "They lose purchasing power",
            "They double",
        ],
        2,
        "Real return is roughly interest minus inflation, here about -2% a year.",
        None,
    ),
    Question::new(
        306,
        Saving,
        HARD,
        "Which effect makes early saving so powerful?",
        [
            "Compound interest",
            "Bank fees",
            "Tax refunds",
            "Currency exchange",
        ],
        0,
        "Returns earn returns themselves, so time in the account matters a lot.",
        None,
    ),
    Question::new(
        307,
        Saving,
        HARD,
        "Saving 100 per month at 5% a year for 30 years ends closest to which total?",
        ["3,600", "18,000", "36,000", "83,000"],
        3,
        "Contributions total 36,000; compounding roughly adds another 47,000.",
        None,
    ),
    // Investing basics
    Question::new(
        401,
        Investing,
        EASY,
        "What is diversification?",
        [
            "Putting all your money into one company",
            "Spreading money across many investments",
            "Only investing in your home country",
            "Selling investments every week",
        ],
        1,
        "Spreading risk means no single failure can sink the whole portfolio.",
        None,
    ),
    Question::new(
        402,
        Investing,
        EASY,
        "Which investment typically has the highest long-term risk and return?",
        ["Savings account", "Government bonds", "Stocks", "Cash"],
        2,
        "Stocks swing more in the short run but historically returned the most.",
        None,
    ),
    Question::new(
        403,
        Investing,
        EASY,
        "What is an index fund?",
        [
            "A fund picked by a star manager",
            "A savings account with a bonus",
            "A loan for investors",
            "A fund that tracks a market index",
        ],
        3,
        "Index funds hold the whole index instead of trying to pick winners.",
        None,
    ),
    Question::new(
        404,
        Investing,
        MEDIUM,
        "Why do fees matter so much for long-term investing?",
        [
            "They compound against you every year",
            "They are only charged once",
            "They are refunded at retirement",
            "They only apply to bonds",
        ],
        0,
        "A 1% yearly fee can consume a large share of returns over decades.",
        None,
    ),
    Question::new(
        405,
        Investing,
        MEDIUM,
        "When interest rates rise, what typically happens to existing bond prices?",
        ["They rise", "They fall", "They stay fixed", "They become stocks"],
        1,
        "New bonds pay more, so older lower-yield bonds are worth less.",
        None,
    ),
    Question::new(
        406,
        Investing,
        HARD,
        "What is dollar-cost averaging?",
        [
            "Converting savings into dollars",
            "Buying only when prices drop",
            "Investing a fixed amount at regular intervals",
            "Averaging the price of gold",
        ],
        2,
        "Fixed regular purchases buy more units when prices are low.",
        Some("It reduces timing risk, though lump sums often win when markets rise."),
    ),
    Question::new(
        407,
        Investing,
        HARD,
        "A portfolio falls 50%. What gain is needed to get back to the start?",
        ["25%", "50%", "75%", "100%"],
        3,
        "Half the money must double to recover, which is a 100% gain.",
        None,
    ),
    // Crisis planning
    Question::new(
        501,
        CrisisPlanning,
        EASY,
        "What should you do first if you lose your job?",
        [
            "Review your budget and cut non-essential spending",
            "Take a holiday",
            "Increase your credit card limit",
            "Stop paying all bills",
        ],
        0,
        "Knowing your runway early gives you the most options.",
        None,
    ),
    Question::new(
        502,
        CrisisPlanning,
        EASY,
        "Why keep copies of important financial documents in one safe place?",
        [
            "Banks require it by law",
            "So you can act quickly in an emergency",
            "To reduce your taxes",
            "To improve your credit score",
        ],
        1,
        "During a crisis you need account numbers and policies within reach.",
        None,
    ),
    Question::new(
        503,
        CrisisPlanning,
        EASY,
        "Which insurance protects your income if you cannot work due to illness?",
        ["Travel insurance", "Pet insurance", "Disability insurance", "Phone insurance"],
        2,
        "Disability insurance replaces part of your income while you recover.",
        None,
    ),
    Question::new(
        504,
        CrisisPlanning,
        MEDIUM,
        "When facing a payment you cannot make, what is usually the best move?",
        [
            "Ignore the lender until you can pay",
            "Take a payday loan",
            "Borrow from retirement savings first",
            "Contact the lender early to discuss options",
        ],
        3,
        "Lenders often offer hardship plans, but only if you reach out in time.",
        None,
    ),
    Question::new(
        505,
        CrisisPlanning,
        MEDIUM,
        "In a crisis budget, which expense should be protected first?",
        [
            "Housing, utilities and food",
            "Streaming subscriptions",
            "Gym membership",
            "New electronics",
        ],
        0,
        "Essentials keep you safe and housed; everything else can wait.",
        None,
    ),
    Question::new(
        506,
        CrisisPlanning,
        HARD,
        "Why is withdrawing early from a retirement account usually a last resort?",
        [
            "It is illegal",
            "Penalties, taxes and lost growth make it expensive",
            "The money is always frozen",
            "It lowers your credit score directly",
        ],
        1,
        "Early withdrawals often cost penalties plus decades of compounding.",
        None,
    ),
    Question::new(
        507,
        CrisisPlanning,
        HARD,
        "Someone calls claiming to be your bank and asks for a code sent to your phone. What do you do?",
        [
            "Read the code out so they can verify you",
            "Send it by text instead",
            "Hang up and call the bank on its official number",
            "Give only half of the code",
        ],
        2,
        "Banks never ask for one-time codes; this is a common fraud pattern.",
        Some("Scams spike during crises. Verify every unexpected request through a channel you trust."),
    ),
];
