//! The shipped maze templates.
//!
//! `#` wall, `.` pellet, `o` power pellet, ` ` empty, `P` player start, `G` villain spawn,
//! `-` home doorway. Row 9 of each board is the tunnel row.

/// Level 1: open corridors, pellet-free tunnel approaches.
pub const LEVEL_1: [&str; 21] = [
    "###################",
    "#........#........#",
    "#o##.###.#.###.##o#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "####.#       #.####",
    "####.# ##-## #.####",
    "    .  #GGG#  .    ",
    "####.# ##### #.####",
    "####.#       #.####",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#.....P.....#.o#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

/// Level 2: denser pellets and a pelleted tunnel mouth.
pub const LEVEL_2: [&str; 21] = [
    "###################",
    "#o.......#.......o#",
    "#.##.###.#.###.##.#",
    "#.#.............#.#",
    "#.#.##.#####.##.#.#",
    "#......#...#......#",
    "###.##.#.#.#.##.###",
    "###.#.........#.###",
    "###.#.###-###.#.###",
    "   ...##GGG##...   ",
    "###.#.#######.#.###",
    "###.#.........#.###",
    "###.#.#######.#.###",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#.....P.....#..#",
    "##.#.#.#####.#.#.##",
    "#o...#...#...#...o#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

/// Level 3: home raised to the upper half, pellets run through the tunnel.
pub const LEVEL_3: [&str; 21] = [
    "###################",
    "#o...............o#",
    "#.#.###.###.###.#.#",
    "#.#.............#.#",
    "#.#.#.###.###.#.#.#",
    "#...#...........#.#",
    "###.#.###-###.#.#.#",
    "#...#.##GGG##.#...#",
    "#.#.#.#######.#.#.#",
    "....#.........#....",
    "#.#.###.###.###.#.#",
    "#.#.............#.#",
    "#.###.#.###.#.###.#",
    "#.....#..P..#.....#",
    "#.###.#.###.#.###.#",
    "#o...............o#",
    "###.#.#######.#.###",
    "#...#....#....#...#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

/// Templates indexed by `level - 1`.
pub const LEVELS: [&[&str]; 3] = [&LEVEL_1, &LEVEL_2, &LEVEL_3];

/// Target completion time per level, in seconds, indexed by `level - 1`.
pub const PAR_TIMES: [f64; 3] = [60.0, 75.0, 90.0];
