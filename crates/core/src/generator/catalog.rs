use std::fmt;

use crate::model::Question;
use crate::random::Draws;

use super::{
    algebra, arithmetic, charts, coordinates, fractions, measures, money, ratio, statistics, time,
};

/// One menu entry: a topic id, where it sits in the course and how to build it.
#[derive(Clone, Copy)]
pub struct TopicEntry {
    pub id: &'static str,
    pub grade: u8,
    /// Menu number such as `3.14`.
    pub number: &'static str,
    pub title: &'static str,
    generate: fn(&mut Draws<'_>) -> Question,
}

impl TopicEntry {
    pub fn question(&self, draws: &mut Draws<'_>) -> Question {
        let question = (self.generate)(draws);
        tracing::debug!(topic = self.id, kind = question.kind(), "generated question");
        question
    }
}

impl fmt::Debug for TopicEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicEntry")
            .field("id", &self.id)
            .field("grade", &self.grade)
            .field("number", &self.number)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

const fn entry(
    id: &'static str,
    grade: u8,
    number: &'static str,
    title: &'static str,
    generate: fn(&mut Draws<'_>) -> Question,
) -> TopicEntry {
    TopicEntry {
        id,
        grade,
        number,
        title,
        generate,
    }
}

pub(super) static CATALOG: &[TopicEntry] = &[
    // Grade 1
    entry(
        "addition-subtraction",
        1,
        "1.1",
        "Addition & Subtraction",
        arithmetic::addition_subtraction,
    ),
    entry(
        "multiplication-division",
        1,
        "1.2",
        "Multiplication & Division",
        arithmetic::multiplication_division,
    ),
    entry("time", 1, "1.3", "Time", time::time),
    entry("metric-conversions", 1, "1.4", "Metric Conversions", measures::metric_conversions),
    entry("fractions", 1, "1.5", "Fractions", fractions::fractions),
    entry("place-value", 1, "1.6", "Place Value", arithmetic::place_value),
    entry("rounding", 1, "1.7", "Rounding", arithmetic::rounding),
    entry("negative-numbers", 1, "1.8", "Negative Numbers", arithmetic::negative_numbers),
    entry("powers-roots", 1, "1.9", "Powers & Roots", arithmetic::powers_roots),
    entry("bidmas", 1, "1.10", "BIDMAS", arithmetic::bidmas),
    entry("factors-multiples", 1, "1.11", "Factors & Multiples", arithmetic::factors_multiples),
    entry("coordinates", 1, "1.12", "Coordinates", coordinates::coordinates),
    entry("pictograms", 1, "1.13", "Pictograms", charts::pictograms),

    // Grade 2
    entry("calculation-problems", 2, "2.1", "Calculation Problems", money::calculation_problems),
    entry("using-calculator", 2, "2.2", "Using a Calculator", arithmetic::using_calculator),
    entry("systematic-listing", 2, "2.3", "Systematic Listing", arithmetic::systematic_listing),
    entry(
        "fractions-of-amount",
        2,
        "2.4",
        "Fractions of an Amount",
        fractions::fractions_of_amount,
    ),
    entry(
        "fractions-decimals-percentages",
        2,
        "2.5",
        "Fractions,
        Decimals and Percentages",
        fractions::fractions_decimals_percentages,
    ),
    entry("simplifying-algebra", 2, "2.6", "Simplifying Algebra", algebra::simplifying_algebra),
    entry("writing-expression", 2, "2.7", "Writing an Expression", algebra::writing_expression),
    entry("function-machines", 2, "2.8", "Function Machines", algebra::function_machines),
    entry(
        "one-step-equations",
        2,
        "2.9",
        "Solving One Step Equations",
        algebra::one_step_equations,
    ),
    entry("angles", 2, "2.10", "Angles", measures::angles),
    entry("area-perimeter", 2, "2.11", "Area and Perimeter", measures::area_perimeter),
    entry("probability", 2, "2.12", "Probability", statistics::probability),
    entry("frequency-polygons", 2, "2.13", "Frequency Polygons", statistics::frequency_polygons),
    entry("averages", 2, "2.14", "Averages", statistics::averages),
    entry("bar-charts", 2, "2.15", "Bar Charts", statistics::bar_charts),
    entry("stem-leaf", 2, "2.16", "Stem and Leaf", statistics::stem_leaf),
    entry("pie-charts", 2, "2.17", "Pie Charts", statistics::pie_charts),

    // Grade 3
    entry("error-intervals", 3, "3.1", "Error Intervals", arithmetic::error_intervals),
    entry("fractions-g3", 3, "3.2", "Fractions", fractions::fractions_g3),
    entry("estimating", 3, "3.3", "Estimating", arithmetic::estimating),
    entry(
        "writing-simplifying-ratio",
        3,
        "3.4",
        "Writing and Simplifying Ratio",
        ratio::writing_simplifying_ratio,
    ),
    entry("ratio", 3, "3.5", "Ratio", ratio::ratio),
    entry("proportion", 3, "3.6", "Proportion", ratio::proportion),
    entry("percentages", 3, "3.7", "Percentages", money::percentages),
    entry("percentage-change", 3, "3.8", "Percentage Change", money::percentage_change),
    entry("exchange-rates", 3, "3.9", "Exchange Rates", money::exchange_rates),
    entry("conversions-units", 3, "3.10", "Conversions and Units", measures::conversions_units),
    entry("scale-drawings", 3, "3.11", "Scale Drawings", measures::scale_drawings),
    entry("best-buy", 3, "3.12", "Best Buy Questions", money::best_buy),
    entry("substitution", 3, "3.13", "Substitution", algebra::substitution),
    entry("solving-equations", 3, "3.14", "Solving Equations", algebra::solving_equations),
    entry(
        "drawing-linear-graphs",
        3,
        "3.15",
        "Drawing Linear Graphs",
        algebra::drawing_linear_graphs,
    ),
    entry("circles", 3, "3.16", "Area and Circumference of Circles", measures::circles),
    entry("transformations", 3, "3.17", "Transformations", coordinates::transformations),
    entry(
        "area-compound-shapes",
        3,
        "3.18",
        "Area of Compound Shapes",
        measures::area_compound_shapes,
    ),
    entry("frequency-trees", 3, "3.19", "Frequency Trees", statistics::frequency_trees),
    entry("two-way-tables", 3, "3.20", "Two Way Tables", statistics::two_way_tables),

    // Grade 4
    entry(
        "compound-interest",
        4,
        "4.1",
        "Compound Interest and Depreciation",
        money::compound_interest,
    ),
    entry("indices", 4, "4.2", "Indices", arithmetic::indices),
    entry(
        "prime-factors-hcf-lcm",
        4,
        "4.3",
        "Prime Factors,
        HCF and LCM",
        arithmetic::prime_factors_hcf_lcm,
    ),
    entry(
        "distance-time-graphs",
        4,
        "4.4",
        "Real Life and Distance Time Graphs",
        measures::distance_time_graphs,
    ),
    entry("inequalities", 4, "4.5", "Inequalities", algebra::inequalities),
    entry(
        "forming-solving-equations",
        4,
        "4.6",
        "Forming and Solving Equations",
        algebra::forming_solving_equations,
    ),
    entry("sequences-nth-term", 4, "4.7", "Sequences (Nth Term)", algebra::sequences_nth_term),
    entry(
        "expanding-factorising",
        4,
        "4.8",
        "Expanding and Factorising",
        algebra::expanding_factorising,
    ),
    entry("pythagoras", 4, "4.9", "Pythagoras", measures::pythagoras),
    entry(
        "angles-parallel-lines",
        4,
        "4.10",
        "Angles in Parallel Lines",
        measures::angles_parallel_lines,
    ),
    entry("angles-polygons", 4, "4.11", "Angles in Polygons", measures::angles_polygons),
    entry("surface-area", 4, "4.12", "Surface Area", measures::surface_area),
    entry("volume-prism", 4, "4.13", "Volume of a Prism", measures::volume_prism),
    entry("cylinders", 4, "4.14", "Cylinders", measures::cylinders),
    entry("loci-construction", 4, "4.15", "Loci and Construction", measures::loci_construction),
    entry("bearings", 4, "4.16", "Bearings", measures::bearings),
    entry("plans-elevations", 4, "4.17", "Plans and Elevations", measures::plans_elevations),
    entry(
        "averages-frequency-tables",
        4,
        "4.18",
        "Averages from Frequency Tables",
        statistics::averages_frequency_tables,
    ),
    entry("probability-g4", 4, "4.19", "Probability", statistics::probability_g4),
    entry("scatter-graphs", 4, "4.20", "Scatter Graphs", statistics::scatter_graphs),

    // Grade 5
    entry(
        "ratio-fraction-function",
        5,
        "5.1",
        "Writing a Ratio as a Fraction or Linear Function",
        ratio::ratio_fraction_function,
    ),
    entry(
        "direct-inverse-proportion",
        5,
        "5.2",
        "Direct and Inverse Proportion",
        ratio::direct_inverse_proportion,
    ),
    entry("reverse-percentages", 5, "5.3", "Reverse Percentages", money::reverse_percentages),
    entry("standard-form", 5, "5.4", "Standard Form", arithmetic::standard_form),
    entry("speed-density", 5, "5.5", "Speed and Density", measures::speed_density),
    entry(
        "changing-subject-formula",
        5,
        "5.6",
        "Changing the Subject of a Formula",
        algebra::changing_subject_formula,
    ),
    entry(
        "expanding-factorising-quadratics",
        5,
        "5.7",
        "Expanding and Factorising Quadratics",
        algebra::expanding_factorising_quadratics,
    ),
    entry("solving-quadratics", 5, "5.8", "Solving Quadratics", algebra::solving_quadratics),
    entry(
        "drawing-quadratic-graphs",
        5,
        "5.9",
        "Drawing Quadratic Graphs",
        algebra::drawing_quadratic_graphs,
    ),
    entry(
        "cubic-reciprocal-graphs",
        5,
        "5.10",
        "Drawing Other Graphs: Cubic/Reciprocal",
        algebra::cubic_reciprocal_graphs,
    ),
    entry(
        "simultaneous-equations",
        5,
        "5.11",
        "Simultaneous Equations",
        algebra::simultaneous_equations,
    ),
    entry(
        "simultaneous-equations-graphically",
        5,
        "5.12",
        "Solving Simultaneous Equations Graphically",
        algebra::simultaneous_equations_graphically,
    ),
    entry(
        "midpoint-line-segment",
        5,
        "5.13",
        "Midpoint of a Line Segment",
        coordinates::midpoint_line_segment,
    ),
    entry("gradient-line", 5, "5.14", "Gradient of a Line", coordinates::gradient_line),
    entry("equation-line", 5, "5.15", "Equation of a Line", coordinates::equation_line),
    entry("spheres-cones", 5, "5.16", "Spheres and Cones", measures::spheres_cones),
    entry("sectors-arcs", 5, "5.17", "Sector Areas and Arc Lengths", measures::sectors_arcs),
    entry(
        "similar-shapes-lengths",
        5,
        "5.18",
        "Similar Shapes (Lengths)",
        measures::similar_shapes_lengths,
    ),
    entry("sohcahtoa", 5, "5.19", "SOHCAHTOA (Trigonometry)", measures::sohcahtoa),
    entry("exact-trig-values", 5, "5.20", "Exact trig values", measures::exact_trig_values),
    entry("vectors", 5, "5.21", "Vectors", coordinates::vectors),
    entry("probability-trees", 5, "5.22", "Probability Trees", statistics::probability_trees),
    entry("venn-diagrams", 5, "5.23", "Venn Diagrams", statistics::venn_diagrams),

    // Grade 6
    entry(
        "recurring-decimals-fractions",
        6,
        "6.1",
        "Recurring Decimals to Fractions",
        fractions::recurring_decimals_fractions,
    ),
    entry(
        "fractional-negative-indices",
        6,
        "6.2",
        "Fractional and Negative Indices",
        arithmetic::fractional_negative_indices,
    ),
    entry(
        "product-rule-counting",
        6,
        "6.3",
        "The Product Rule for Counting",
        arithmetic::product_rule_counting,
    ),
    entry(
        "repeated-percentage-change",
        6,
        "6.4",
        "Repeated Percentage Change",
        money::repeated_percentage_change,
    ),
    entry(
        "expanding-triple-brackets",
        6,
        "6.5",
        "Expanding Triple Brackets",
        algebra::expanding_triple_brackets,
    ),
    entry(
        "parallel-perpendicular-lines",
        6,
        "6.6",
        "Parallel and Perpendicular Lines",
        coordinates::parallel_perpendicular_lines,
    ),
    entry("inequalities-graphs", 6, "6.7", "Inequalities on Graphs", algebra::inequalities_graphs),
    entry(
        "similar-shapes-area-volume",
        6,
        "6.8",
        "Similar Shapes (Area and Volume)",
        measures::similar_shapes_area_volume,
    ),
    entry(
        "enlarging-negative-scale",
        6,
        "6.9",
        "Enlarging with Negative Scale Factors",
        coordinates::enlarging_negative_scale,
    ),
    entry("circle-theorems", 6, "6.10", "Circle Theorems", measures::circle_theorems),
    entry(
        "cumulative-frequency",
        6,
        "6.11",
        "Cumulative Frequency",
        statistics::cumulative_frequency,
    ),
    entry("box-plots", 6, "6.12", "Box Plots", statistics::box_plots),
    entry("capture-recapture", 6, "6.13", "Capture Recapture", statistics::capture_recapture),

    // Grade 7
    entry("surds", 7, "7.1", "Surds", arithmetic::surds),
    entry("bounds", 7, "7.2", "Bounds", arithmetic::bounds),
    entry(
        "direct-inverse-proportion-g7",
        7,
        "7.3",
        "Direct and Inverse Proportion",
        ratio::direct_inverse_proportion_g7,
    ),
    entry("quadratic-formula", 7, "7.4", "Quadratic Formula", algebra::quadratic_formula),
    entry(
        "factorising-harder-quadratics",
        7,
        "7.5",
        "Factorising Harder Quadratics",
        algebra::factorising_harder_quadratics,
    ),
    entry("algebraic-fractions", 7, "7.6", "Algebraic Fractions", algebra::algebraic_fractions),
    entry(
        "rearranging-harder-formulae",
        7,
        "7.7",
        "Rearranging Harder Formulae",
        algebra::rearranging_harder_formulae,
    ),
    entry(
        "trig-exponential-graphs",
        7,
        "7.8",
        "Trigonometric and Exponential Graphs",
        algebra::trig_exponential_graphs,
    ),
    entry(
        "inverse-composite-functions",
        7,
        "7.9",
        "Inverse and Composite Functions",
        algebra::inverse_composite_functions,
    ),
    entry("iteration", 7, "7.10", "Iteration", algebra::iteration),
    entry(
        "area-any-triangle",
        7,
        "7.11",
        "Finding the Area of Any Triangle",
        measures::area_any_triangle,
    ),
    entry("sine-rule", 7, "7.12", "The Sine Rule", measures::sine_rule),
    entry("cosine-rule", 7, "7.13", "The Cosine Rule", measures::cosine_rule),
    entry("congruent-triangles", 7, "7.14", "Congruent Triangles", measures::congruent_triangles),
    entry(
        "3d-pythagoras-trig",
        7,
        "7.15",
        "3d Pythagoras and Trigonometry",
        measures::three_d_pythagoras_trig,
    ),
    entry("histograms", 7, "7.16", "Histograms", statistics::histograms),
    entry(
        "conditional-probability",
        7,
        "7.17",
        "Conditional Probability",
        statistics::conditional_probability,
    ),
];
