use lightfield_core::{Position, SimConfig};
use lightfield_world::{Board, Creature, LightPath, LightSource, Simulation};

#[test]
fn light_tours_the_border_and_illumination_follows() {
    let mut board = Board::new(6, 5);
    board.fill(None);
    board.set_light(LightSource::new(Position::new(0, 0), 4));
    let path = LightPath::border_loop(6, 5);

    for expected in path.steps().iter().cycle().skip(1).take(path.len()) {
        board.advance_light(&path);
        assert_eq!(board.light().unwrap().position, *expected);

        board.recompute_illumination();
        let light = board.light().unwrap().clone();
        for y in 0..3 {
            for x in 0..4 {
                let cell = board.cell_at(Position::new(x, y)).unwrap();
                let distance = Board::manhattan_distance(&light.position, &cell.position);
                assert_eq!(cell.illumination(), (4 - distance).max(0));
            }
        }

        let snapshot = board.render().unwrap();
        assert_eq!(snapshot.glyph_at(light.position), Some('O'));
    }

    assert_eq!(board.light().unwrap().position, Position::new(0, 0));
}

#[test]
fn creatures_survive_ticks_and_removal_keeps_order() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.board_mut()
        .add_creature(Creature::corpse(Position::new(2, 2)));

    for _ in 0..5 {
        let snapshot = sim.step().unwrap();
        assert_eq!(snapshot.height(), 5);
        assert_eq!(snapshot.width(), 5);
        assert_eq!(snapshot.glyph_at(Position::new(3, 3)), Some('T'));
    }

    let first = sim.board().creature(0).unwrap().id;
    assert!(sim.board_mut().remove_creature(2).is_none());
    sim.board_mut().remove_creature(1);
    assert_eq!(sim.board().creatures().len(), 1);
    assert_eq!(sim.board().creature(0).unwrap().id, first);
}

#[test]
fn rejected_light_moves_do_not_disturb_the_tick() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.step();
    assert!(!sim.board_mut().set_light_position(2, 2));
    assert_eq!(sim.board().light().unwrap().position, Position::new(0, 1));

    sim.step();
    assert_eq!(sim.board().light().unwrap().position, Position::new(0, 2));
}
