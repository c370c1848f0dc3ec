use std::sync::Arc;

use warships::surface::NullDisplay;
use warships::{
    AutoTargeter, GameService, LocalReferee, MatchDriver, MatchEnd, MatchRequest, Phase, Profile,
    Session,
};

#[tokio::test(start_paused = true)]
async fn auto_targeter_finishes_a_local_match() -> anyhow::Result<()> {
    for seed in 0..5 {
        let service: Arc<dyn GameService> = Arc::new(LocalReferee::seeded(seed));
        let mut input = AutoTargeter::seeded(seed + 100);
        let mut display = NullDisplay;
        let mut driver = MatchDriver::new(service, Session::new(Profile::default()), &mut input, &mut display);
        let req = MatchRequest {
            nick: "demo".into(),
            vs_bot: true,
            ..MatchRequest::default()
        };

        let end = driver.play(&req).await?;
        let session = driver.into_session();
        assert!(matches!(end, MatchEnd::Finished(_)), "seed {}: {:?}", seed, end);
        assert!(matches!(session.phase(), Phase::Ended(_)));
        assert!(session.shots_fired() > 0);
        assert_eq!(session.own_ships().len(), 20);
    }
    Ok(())
}
